//! Reference document identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RouteError;

/// Identifier of one reference document in the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentRef {
    /// `AppIntent` protocol, parameters, `perform()`
    IntentFundamentals,
    /// `AppShortcutsProvider` and phrases
    ShortcutsProvider,
    /// `AppEntity`, `EntityQuery` and friends
    EntitiesAndQueries,
    /// `IndexedEntity` and Core Spotlight
    SpotlightIndexing,
    /// Siri, assistant schemas
    SiriIntegration,
    /// Apple Intelligence and visual intelligence
    AppleIntelligence,
    /// Snippet views and snippet intents
    InteractiveSnippets,
    /// Intents as the app's action layer
    IntentDrivenArchitecture,
    /// Moving off SiriKit custom intents
    MigrationFromSirikit,
    /// Unit and integration testing
    TestingIntents,
    /// Known failure modes
    CommonPitfalls,
}

impl DocumentRef {
    /// All documents, in catalogue order
    pub const ALL: [DocumentRef; 11] = [
        DocumentRef::IntentFundamentals,
        DocumentRef::ShortcutsProvider,
        DocumentRef::EntitiesAndQueries,
        DocumentRef::SpotlightIndexing,
        DocumentRef::SiriIntegration,
        DocumentRef::AppleIntelligence,
        DocumentRef::InteractiveSnippets,
        DocumentRef::IntentDrivenArchitecture,
        DocumentRef::MigrationFromSirikit,
        DocumentRef::TestingIntents,
        DocumentRef::CommonPitfalls,
    ];

    /// Stable kebab-case identifier
    pub const fn as_str(self) -> &'static str {
        match self {
            DocumentRef::IntentFundamentals => "intent-fundamentals",
            DocumentRef::ShortcutsProvider => "shortcuts-provider",
            DocumentRef::EntitiesAndQueries => "entities-and-queries",
            DocumentRef::SpotlightIndexing => "spotlight-indexing",
            DocumentRef::SiriIntegration => "siri-integration",
            DocumentRef::AppleIntelligence => "apple-intelligence",
            DocumentRef::InteractiveSnippets => "interactive-snippets",
            DocumentRef::IntentDrivenArchitecture => "intent-driven-architecture",
            DocumentRef::MigrationFromSirikit => "migration-from-sirikit",
            DocumentRef::TestingIntents => "testing-intents",
            DocumentRef::CommonPitfalls => "common-pitfalls",
        }
    }

    /// Human-readable description of what the document covers
    pub const fn description(self) -> &'static str {
        match self {
            DocumentRef::IntentFundamentals => {
                "AppIntent protocol, parameters, perform(), results and dialogs"
            }
            DocumentRef::ShortcutsProvider => {
                "AppShortcutsProvider, phrase rules and parameterized shortcuts"
            }
            DocumentRef::EntitiesAndQueries => {
                "AppEntity, EntityQuery, string and property queries, AppEnum"
            }
            DocumentRef::SpotlightIndexing => {
                "IndexedEntity, CSSearchableIndex donation and index maintenance"
            }
            DocumentRef::SiriIntegration => {
                "Siri invocation, assistant schemas and on-screen awareness"
            }
            DocumentRef::AppleIntelligence => {
                "Apple Intelligence domains and visual intelligence search"
            }
            DocumentRef::InteractiveSnippets => {
                "Snippet views, SnippetIntent and buttons inside snippets"
            }
            DocumentRef::IntentDrivenArchitecture => {
                "Sharing intents between app UI, widgets, controls and Siri"
            }
            DocumentRef::MigrationFromSirikit => {
                "Replacing SiriKit custom intents and intent definition files"
            }
            DocumentRef::TestingIntents => {
                "Unit testing perform(), queries and shortcuts from the Shortcuts app"
            }
            DocumentRef::CommonPitfalls => {
                "Metadata extraction failures, missing phrases and runtime errors"
            }
        }
    }

    /// File name of the document under the corpus `references/` directory
    pub fn file_name(self) -> String {
        format!("{}.md", self.as_str())
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DocumentRef {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentRef::ALL
            .into_iter()
            .find(|doc| doc.as_str() == s)
            .ok_or_else(|| RouteError::DocumentNotRecognized(s.to_string()))
    }
}
