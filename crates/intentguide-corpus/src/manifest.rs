//! `SKILL.md` parsing
//!
//! The routing file starts with YAML frontmatter naming the corpus

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::warn;

/// File name of the routing document at the corpus root
pub const MANIFEST_FILE: &str = "SKILL.md";

/// Maximum name length before a warning is logged
const MAX_NAME_LENGTH: usize = 64;
/// Maximum description length before a warning is logged
const MAX_DESCRIPTION_LENGTH: usize = 1024;

static FRONTMATTER_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^---\s*\n([\s\S]*?)\n---\s*\n([\s\S]*)$"));

static NAME_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$"));

/// Corpus metadata extracted from YAML frontmatter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CorpusManifest {
    /// Corpus name (lowercase letters, numbers and hyphens only)
    pub name: String,
    /// What the corpus covers and when to consult it
    pub description: String,
}

impl CorpusManifest {
    /// Read and validate `SKILL.md` in `dir`, returning the manifest and the
    /// body below the frontmatter
    pub fn from_dir(dir: &Path) -> Result<(Self, String)> {
        let file = dir.join(MANIFEST_FILE);

        if !file.exists() {
            return Err(anyhow!("{} not found in {:?}", MANIFEST_FILE, dir));
        }

        let content =
            fs::read_to_string(&file).with_context(|| format!("Failed to read {:?}", file))?;

        let (manifest, body) = parse_manifest(&content)
            .with_context(|| format!("Failed to parse manifest from {:?}", file))?;

        manifest.validate()?;
        Ok((manifest, body))
    }

    /// Validate name and description
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(anyhow!("Corpus name cannot be empty"));
        }

        if self.name.len() > MAX_NAME_LENGTH {
            warn!(
                "Corpus name '{}' exceeds {} characters (was {})",
                self.name,
                MAX_NAME_LENGTH,
                self.name.len()
            );
        }

        let name_re = NAME_RE
            .as_ref()
            .map_err(|e| anyhow!("Failed to compile name validation regex: {}", e))?;

        if !name_re.is_match(&self.name) {
            return Err(anyhow!(
                "Corpus name '{}' must contain only lowercase letters, numbers, and hyphens",
                self.name
            ));
        }

        if self.description.trim().is_empty() {
            return Err(anyhow!("Corpus description cannot be empty"));
        }

        if self.description.len() > MAX_DESCRIPTION_LENGTH {
            warn!(
                "Corpus '{}' description exceeds {} characters (was {})",
                self.name,
                MAX_DESCRIPTION_LENGTH,
                self.description.len()
            );
        }

        Ok(())
    }
}

/// Split content into frontmatter metadata and body
pub(crate) fn parse_manifest(content: &str) -> Result<(CorpusManifest, String)> {
    let frontmatter_re = FRONTMATTER_RE
        .as_ref()
        .map_err(|e| anyhow!("Failed to compile regex: {}", e))?;

    let captures = frontmatter_re
        .captures(content)
        .ok_or_else(|| anyhow!("No valid YAML frontmatter found"))?;

    let yaml_str = captures
        .get(1)
        .ok_or_else(|| anyhow!("Failed to extract frontmatter"))?
        .as_str();

    let body = captures.get(2).map_or("", |m| m.as_str());

    let manifest: CorpusManifest =
        serde_yaml::from_str(yaml_str).context("Failed to parse YAML frontmatter")?;

    Ok((manifest, body.to_string()))
}
