//! External frame encoding.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use replay_types::Frame;
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Encodes an ordered frame sequence into an animation, keyed per episode.
pub trait FrameEncoder {
    /// Encode the frames recorded for one episode.
    fn encode(&mut self, key: &str, frames: &[Frame]) -> Result<()>;
}

/// Pipes raw RGB24 frames into an `ffmpeg` child process producing a
/// palette-optimized GIF (`seq_<key>.gif` in the output directory).
///
/// A non-zero exit surfaces as [`PipelineError::Encoder`] carrying the
/// command line and the process's stderr.
#[derive(Debug, Clone)]
pub struct GifEncoder {
    output_dir: PathBuf,
    fps: f64,
    command: String,
}

/// Generate the palette inline and apply it in one pass.
const PALETTE_FILTER: &str = "[0:v]split[x][z];[z]palettegen[y];[x]fifo[x];[x][y]paletteuse";

impl GifEncoder {
    /// Create an encoder writing GIFs into `output_dir` at the given frame
    /// rate.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, fps: f64) -> Self {
        Self {
            output_dir: output_dir.into(),
            fps,
            command: "ffmpeg".to_owned(),
        }
    }

    /// Override the encoder executable (tests, non-standard installs).
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Path of the GIF written for a key.
    #[must_use]
    pub fn gif_path(&self, key: &str) -> PathBuf {
        self.output_dir.join(format!("seq_{key}.gif"))
    }

    fn run(&self, path: &Path, frames: &[Frame]) -> Result<()> {
        let first = frames
            .first()
            .ok_or_else(|| PipelineError::io("cannot encode an empty frame sequence"))?;
        if frames
            .iter()
            .any(|f| f.width != first.width || f.height != first.height)
        {
            return Err(PipelineError::io(
                "cannot encode frames of differing dimensions",
            ));
        }

        let args = [
            "-y".to_owned(),
            "-f".to_owned(),
            "rawvideo".to_owned(),
            "-vcodec".to_owned(),
            "rawvideo".to_owned(),
            "-r".to_owned(),
            format!("{:.02}", self.fps),
            "-s".to_owned(),
            format!("{}x{}", first.width, first.height),
            "-pix_fmt".to_owned(),
            "rgb24".to_owned(),
            "-i".to_owned(),
            "-".to_owned(),
            "-filter_complex".to_owned(),
            PALETTE_FILTER.to_owned(),
            path.display().to_string(),
        ];
        let command_line = format!("{} {}", self.command, args.join(" "));
        debug!(command = %command_line, "spawning frame encoder");

        let mut child = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // A dying encoder closes its stdin early; remember the write error
        // but let the exit status and stderr tell the real story.
        let write_result = match child.stdin.take() {
            Some(mut stdin) => frames
                .iter()
                .try_for_each(|frame| stdin.write_all(&frame.pixels)),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(PipelineError::Encoder {
                command: command_line,
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        write_result?;
        Ok(())
    }
}

impl FrameEncoder for GifEncoder {
    fn encode(&mut self, key: &str, frames: &[Frame]) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.gif_path(key);
        self.run(&path, frames)
    }
}
