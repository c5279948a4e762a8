//! Packaged sequence sinks.

use std::fs;
use std::path::PathBuf;

use replay_types::{PackagedSequence, SceneDescription};

use crate::error::Result;

/// Accepts one packaged sequence per processed episode, written under a
/// per-episode key together with the replay scene description.
pub trait SequenceSink {
    /// Persist one packaged sequence.
    fn write_sequence(
        &mut self,
        key: &str,
        sequence: &PackagedSequence,
        scene: &SceneDescription,
    ) -> Result<()>;
}

/// A directory sink writing `seq_<key>.json` records with the scene blob
/// alongside as `seq_<key>.xml`.
#[derive(Debug, Clone)]
pub struct JsonDirectorySink {
    dir: PathBuf,
}

impl JsonDirectorySink {
    /// Create a sink over a directory (created on first write).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of a sequence record.
    #[must_use]
    pub fn sequence_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("seq_{key}.json"))
    }

    /// Path of a scene blob.
    #[must_use]
    pub fn scene_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("seq_{key}.xml"))
    }
}

impl SequenceSink for JsonDirectorySink {
    fn write_sequence(
        &mut self,
        key: &str,
        sequence: &PackagedSequence,
        scene: &SceneDescription,
    ) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let text = serde_json::to_string(sequence)?;
        fs::write(self.sequence_path(key), text)?;
        fs::write(self.scene_path(key), scene.as_str())?;
        Ok(())
    }
}

/// An in-memory sink collecting written sequences, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Written sequences in write order.
    pub sequences: Vec<(String, PackagedSequence)>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of written sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl SequenceSink for MemorySink {
    fn write_sequence(
        &mut self,
        key: &str,
        sequence: &PackagedSequence,
        _scene: &SceneDescription,
    ) -> Result<()> {
        self.sequences.push((key.to_owned(), sequence.clone()));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use replay_types::pad_mask;

    fn sequence(n: usize, target: usize) -> PackagedSequence {
        PackagedSequence {
            images: Vec::new(),
            actions: Vec::new(),
            states: Vec::new(),
            pad_mask: pad_mask(n, target),
            joint_velocities: Vec::new(),
            original_length: n,
            target_length: target,
        }
    }

    #[test]
    fn json_sink_writes_record_and_scene() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonDirectorySink::new(dir.path().join("out"));

        sink.write_sequence(
            "3",
            &sequence(4, 6),
            &SceneDescription::new("<scene name=\"t\"/>"),
        )
        .unwrap();

        let record = fs::read_to_string(sink.sequence_path("3")).unwrap();
        let parsed: PackagedSequence = serde_json::from_str(&record).unwrap();
        assert_eq!(parsed.original_length, 4);
        assert_eq!(parsed.target_length, 6);

        let scene = fs::read_to_string(sink.scene_path("3")).unwrap();
        assert_eq!(scene, "<scene name=\"t\"/>");
    }

    #[test]
    fn memory_sink_collects_in_order() {
        let mut sink = MemorySink::new();
        let scene = SceneDescription::default();
        sink.write_sequence("a", &sequence(1, 2), &scene).unwrap();
        sink.write_sequence("b", &sequence(2, 2), &scene).unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.sequences[0].0, "a");
        assert_eq!(sink.sequences[1].1.original_length, 2);
    }
}
