//! Finding a corpus on disk
//!
//! Candidates are checked in the order they were added; the first directory
//! holding a `SKILL.md` wins.

use std::path::PathBuf;
use tracing::{debug, warn};

use crate::manifest::MANIFEST_FILE;

/// Directory name the corpus is installed under as a skill
pub const SKILL_DIR_NAME: &str = "app-intents";

/// Ordered list of places a corpus may live
#[derive(Debug, Clone, Default)]
pub struct CorpusLocator {
    directories: Vec<PathBuf>,
}

impl CorpusLocator {
    /// Create an empty locator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate corpus directory
    pub fn add_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directories.push(dir.into());
        self
    }

    /// Add personal skill directory: ~/.claude/skills/app-intents/
    pub fn with_personal_skills(self) -> Self {
        if let Some(home) = dirs::home_dir() {
            self.add_directory(
                home.join(".claude")
                    .join("skills")
                    .join(SKILL_DIR_NAME),
            )
        } else {
            warn!("Could not find home directory for personal skills");
            self
        }
    }

    /// Add project skill directory: ./.claude/skills/app-intents/
    pub fn with_project_skills(self) -> Self {
        self.add_directory(PathBuf::from(".claude/skills").join(SKILL_DIR_NAME))
    }

    /// Candidate directories in search order
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// First candidate that holds a `SKILL.md`
    pub fn locate(&self) -> Option<PathBuf> {
        for dir in &self.directories {
            if dir.join(MANIFEST_FILE).is_file() {
                debug!("Found corpus at {:?}", dir);
                return Some(dir.clone());
            }
            debug!("No corpus at {:?}", dir);
        }
        None
    }
}
