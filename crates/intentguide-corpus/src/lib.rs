//! intentguide corpus
//!
//! The corpus is a folder holding `SKILL.md` (YAML frontmatter plus the
//! routing prose) and a `references/` folder with one Markdown file per
//! reference document.
//!
//! ## Architecture
//!
//! Open: parse the `SKILL.md` frontmatter and register every reference file
//! that exists, without reading it
//! Load: read a reference file the first time it is requested, then cache it

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod corpus;
pub mod locator;
pub mod manifest;
pub mod sections;

pub use corpus::{Corpus, ReferenceDoc, VerifyReport};
pub use locator::CorpusLocator;
pub use manifest::CorpusManifest;
pub use sections::{parse_checklists, parse_routing, ChecklistSection, RoutingSection};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Corpus, CorpusLocator, CorpusManifest};
}
