//! The opened corpus
//!
//! Opening registers reference files by path only. Bodies are read on the
//! first `load` and cached afterwards.

use anyhow::{anyhow, Context, Result};
use intentguide_routing::{checklists, RoutingTable};
use intentguide_types::{DocumentRef, Topic};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::manifest::CorpusManifest;
use crate::sections::{parse_checklists, parse_routing, ROUTING_HEADING};

/// Directory under the corpus root holding the reference files
pub const REFERENCES_DIR: &str = "references";

/// One reference document registered in the corpus
#[derive(Debug, Clone)]
pub struct ReferenceDoc {
    /// Document identifier
    pub doc: DocumentRef,
    /// Full path to the Markdown file
    pub path: PathBuf,
    /// File content (loaded on demand)
    pub content: Option<String>,
}

impl ReferenceDoc {
    fn new(doc: DocumentRef, path: PathBuf) -> Self {
        Self {
            doc,
            path,
            content: None,
        }
    }

    /// Read content if not already loaded
    pub fn load_content(&mut self) -> Result<&str> {
        if self.content.is_none() {
            let content = fs::read_to_string(&self.path)
                .with_context(|| format!("Failed to read {:?}", self.path))?;
            debug!("Loaded '{}' ({} bytes)", self.doc, content.len());
            self.content = Some(content);
        }

        Ok(self.content.as_deref().unwrap_or_default())
    }

    /// Whether the content has been read yet
    pub fn is_loaded(&self) -> bool {
        self.content.is_some()
    }
}

/// Result of checking the corpus against the routing table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Routed documents with a reference file
    pub present: BTreeSet<DocumentRef>,
    /// Routed documents without a reference file
    pub missing: BTreeSet<DocumentRef>,
    /// Places where `SKILL.md` disagrees with the routing table or checklists
    pub mismatches: Vec<String>,
}

impl VerifyReport {
    /// True when every routed document has a reference file and `SKILL.md`
    /// agrees with the library
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty() && self.mismatches.is_empty()
    }
}

/// An opened App Intents reference corpus
#[derive(Debug)]
pub struct Corpus {
    root: PathBuf,
    manifest: CorpusManifest,
    routing_body: String,
    documents: HashMap<DocumentRef, ReferenceDoc>,
}

impl Corpus {
    /// Open the corpus rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(anyhow!("Corpus path is not a directory: {:?}", root));
        }

        let (manifest, routing_body) = CorpusManifest::from_dir(&root)?;
        info!("Opening corpus '{}' at {:?}", manifest.name, root);

        let references = root.join(REFERENCES_DIR);
        let mut documents = HashMap::new();

        for doc in DocumentRef::ALL {
            let path = references.join(doc.file_name());
            if path.is_file() {
                debug!("Registered '{}' at {:?}", doc, path);
                documents.insert(doc, ReferenceDoc::new(doc, path));
            } else {
                warn!("Reference file missing for '{}': {:?}", doc, path);
            }
        }

        info!(
            "Registered {}/{} reference documents",
            documents.len(),
            DocumentRef::ALL.len()
        );

        Ok(Self {
            root,
            manifest,
            routing_body,
            documents,
        })
    }

    /// Corpus root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parsed `SKILL.md` frontmatter
    pub fn manifest(&self) -> &CorpusManifest {
        &self.manifest
    }

    /// `SKILL.md` content below the frontmatter
    pub fn routing_body(&self) -> &str {
        &self.routing_body
    }

    /// Get a registered document (content may not be loaded yet)
    pub fn get(&self, doc: DocumentRef) -> Option<&ReferenceDoc> {
        self.documents.get(&doc)
    }

    /// Load and return the content of a document
    pub fn load(&mut self, doc: DocumentRef) -> Result<&str> {
        let root = &self.root;
        self.documents
            .get_mut(&doc)
            .ok_or_else(|| anyhow!("Document '{}' not found in corpus {:?}", doc, root))?
            .load_content()
    }

    /// Number of registered documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if no reference documents were found
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Compare the routing section of `SKILL.md` with `table`
    fn routing_mismatches(&self, table: &RoutingTable) -> Vec<String> {
        let sections = match parse_routing(&self.routing_body) {
            Ok(sections) => sections,
            Err(e) => return vec![format!("{}: {}", ROUTING_HEADING, e)],
        };

        let mut mismatches = Vec::new();

        for entry in table.entries() {
            let expected: Vec<&str> = entry.documents.iter().map(|d| d.as_str()).collect();
            match sections.iter().find(|s| s.topic == entry.topic.as_str()) {
                Some(section) if section.documents == expected => {}
                Some(section) => mismatches.push(format!(
                    "SKILL.md routes '{}' to [{}], table routes it to [{}]",
                    entry.topic,
                    section.documents.join(", "),
                    expected.join(", ")
                )),
                None => mismatches.push(format!(
                    "SKILL.md has no routing entry for '{}'",
                    entry.topic
                )),
            }
        }

        for section in &sections {
            if section.topic.parse::<Topic>().is_err() {
                mismatches.push(format!("SKILL.md routes unknown topic '{}'", section.topic));
            }
        }

        mismatches
    }

    /// Compare the checklist section of `SKILL.md` with the static checklists
    fn checklist_mismatches(&self) -> Vec<String> {
        let lists = parse_checklists(&self.routing_body);
        let mut mismatches = Vec::new();

        for list in checklists() {
            match lists.iter().find(|l| l.title == list.title) {
                Some(parsed) if parsed.items == list.items => {}
                Some(_) => mismatches.push(format!(
                    "SKILL.md checklist '{}' differs from '{}'",
                    list.title, list.kind
                )),
                None => mismatches.push(format!("SKILL.md has no checklist '{}'", list.title)),
            }
        }

        mismatches
    }

    /// Check that every document the routing table points at exists on disk
    /// and that `SKILL.md` lists the same routing and checklists
    pub fn verify(&self, table: &RoutingTable) -> VerifyReport {
        let mut report = VerifyReport::default();

        for doc in table.entries().flat_map(|entry| entry.documents.iter()) {
            if self.documents.contains_key(doc) {
                report.present.insert(*doc);
            } else {
                report.missing.insert(*doc);
            }
        }

        report.mismatches.extend(self.routing_mismatches(table));
        report.mismatches.extend(self.checklist_mismatches());

        for mismatch in &report.mismatches {
            warn!("{}", mismatch);
        }

        if report.is_ok() {
            info!("Corpus verified: {} documents present", report.present.len());
        } else {
            warn!("Corpus is missing {} routed documents", report.missing.len());
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_root() {
        let err = Corpus::open("/definitely/not/a/corpus").unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_verify_report_default_ok() {
        assert!(VerifyReport::default().is_ok());
    }
}
