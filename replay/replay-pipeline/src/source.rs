//! Demonstration sources.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use replay_types::Episode;

use crate::error::{PipelineError, Result};

/// A read-only container of recorded demonstrations keyed by episode
/// identifier. Keys enumerate in a stable order.
pub trait DemonstrationSource {
    /// All episode keys, in a stable order.
    fn episode_keys(&self) -> Result<Vec<String>>;

    /// Load one episode by key.
    fn load_episode(&self, key: &str) -> Result<Episode>;
}

/// An in-memory demonstration source.
///
/// Keys enumerate in lexicographic order. Used by tests and small tools.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    episodes: BTreeMap<String, Episode>,
}

impl InMemorySource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an episode under a key, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, episode: Episode) {
        self.episodes.insert(key.into(), episode);
    }

    /// Number of stored episodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    /// Whether the source is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

impl DemonstrationSource for InMemorySource {
    fn episode_keys(&self) -> Result<Vec<String>> {
        Ok(self.episodes.keys().cloned().collect())
    }

    fn load_episode(&self, key: &str) -> Result<Episode> {
        self.episodes
            .get(key)
            .cloned()
            .ok_or_else(|| PipelineError::EpisodeNotFound(key.to_owned()))
    }
}

/// A directory of `demo_<key>.json` episode records.
///
/// Keys are the file stems between the `demo_` prefix and the `.json`
/// suffix, enumerated in sorted order.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    dir: PathBuf,
}

const EPISODE_PREFIX: &str = "demo_";
const EPISODE_SUFFIX: &str = ".json";

impl JsonDirectorySource {
    /// Create a source over a directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of an episode record.
    #[must_use]
    pub fn episode_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{EPISODE_PREFIX}{key}{EPISODE_SUFFIX}"))
    }
}

impl DemonstrationSource for JsonDirectorySource {
    fn episode_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(stem) = name
                .strip_prefix(EPISODE_PREFIX)
                .and_then(|rest| rest.strip_suffix(EPISODE_SUFFIX))
            {
                keys.push(stem.to_owned());
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn load_episode(&self, key: &str) -> Result<Episode> {
        let path = self.episode_path(key);
        if !path.exists() {
            return Err(PipelineError::EpisodeNotFound(key.to_owned()));
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Write an episode record where [`JsonDirectorySource`] will find it.
pub fn write_episode(dir: &Path, key: &str, episode: &Episode) -> Result<()> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{EPISODE_PREFIX}{key}{EPISODE_SUFFIX}"));
    let text = serde_json::to_string(episode)?;
    fs::write(path, text)?;
    Ok(())
}
