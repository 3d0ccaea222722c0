//! The task-based routing table
//!
//! One entry per topic, authored in the same order and with the same reading
//! priority as the "Task-based routing" section of `SKILL.md`.

use intentguide_types::{DocumentRef, Result, RouteError, Topic};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

use DocumentRef::{
    AppleIntelligence, CommonPitfalls, EntitiesAndQueries, IntentDrivenArchitecture,
    IntentFundamentals, InteractiveSnippets, MigrationFromSirikit, ShortcutsProvider,
    SiriIntegration, SpotlightIndexing, TestingIntents,
};

/// One topic and the documents to read for it, most relevant first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoutingEntry {
    /// Routing key
    pub topic: Topic,
    /// Documents in reading-priority order (never empty)
    pub documents: &'static [DocumentRef],
}

impl RoutingEntry {
    const fn new(topic: Topic, documents: &'static [DocumentRef]) -> Self {
        Self { topic, documents }
    }
}

const ENTRIES: [RoutingEntry; 10] = [
    RoutingEntry::new(Topic::FirstIntent, &[IntentFundamentals, ShortcutsProvider]),
    RoutingEntry::new(
        Topic::SearchableContent,
        &[EntitiesAndQueries, SpotlightIndexing, SiriIntegration],
    ),
    RoutingEntry::new(
        Topic::AssistantIntegration,
        &[SiriIntegration, AppleIntelligence, EntitiesAndQueries],
    ),
    RoutingEntry::new(
        Topic::InteractiveSnippets,
        &[InteractiveSnippets, IntentFundamentals],
    ),
    RoutingEntry::new(
        Topic::ShortcutsAndPhrases,
        &[ShortcutsProvider, SiriIntegration],
    ),
    RoutingEntry::new(
        Topic::IntentDrivenArchitecture,
        &[IntentDrivenArchitecture, EntitiesAndQueries],
    ),
    RoutingEntry::new(
        Topic::VisualIntelligence,
        &[AppleIntelligence, EntitiesAndQueries],
    ),
    RoutingEntry::new(
        Topic::SirikitMigration,
        &[MigrationFromSirikit, IntentFundamentals],
    ),
    RoutingEntry::new(Topic::Testing, &[TestingIntents, CommonPitfalls]),
    RoutingEntry::new(
        Topic::BuildAndRuntimeErrors,
        &[CommonPitfalls, TestingIntents],
    ),
];

static BUILTIN: RoutingTable = RoutingTable { entries: &ENTRIES };

/// Read-only mapping from topic to ordered documents
#[derive(Debug)]
pub struct RoutingTable {
    entries: &'static [RoutingEntry],
}

impl RoutingTable {
    /// The routing table shipped with the corpus
    #[must_use]
    pub fn builtin() -> &'static RoutingTable {
        &BUILTIN
    }

    /// Resolve a topic identifier to its documents
    ///
    /// # Errors
    /// Returns `RouteError::TopicNotRecognized` when `topic` is not one of the
    /// predefined identifiers. No partial or default result is produced.
    pub fn lookup(&self, topic: &str) -> Result<&'static [DocumentRef]> {
        let parsed = topic.parse::<Topic>().inspect_err(|_| {
            warn!("No routing entry for topic '{}'", topic);
        })?;

        self.try_route(parsed).inspect(|docs| {
            debug!("Routed '{}' to {} document(s)", parsed, docs.len());
        })
    }

    /// Resolve a typed topic to its documents
    ///
    /// Tables are only built by `builtin()`, whose entries cover every topic
    /// with a non-empty list (`check_integrity` holds), so the result is never
    /// empty.
    #[must_use]
    pub fn route(&self, topic: Topic) -> &'static [DocumentRef] {
        self.try_route(topic).unwrap_or(&[])
    }

    fn try_route(&self, topic: Topic) -> Result<&'static [DocumentRef]> {
        self.entries
            .iter()
            .find(|entry| entry.topic == topic)
            .map(|entry| entry.documents)
            .ok_or_else(|| RouteError::TopicNotRecognized(topic.to_string()))
    }

    /// All entries in authored order
    pub fn entries(&self) -> impl Iterator<Item = &'static RoutingEntry> {
        self.entries.iter()
    }

    /// All routing keys in authored order
    pub fn topics(&self) -> impl Iterator<Item = Topic> {
        self.entries.iter().map(|entry| entry.topic)
    }

    /// Every document in catalogue order, for callers that got no routing match
    #[must_use]
    pub fn all_documents(&self) -> &'static [DocumentRef] {
        &DocumentRef::ALL
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Verify the structural invariants of the table
    ///
    /// # Errors
    /// Returns `RouteError::Integrity` if a topic has no entry or several,
    /// an entry is empty, or an entry lists the same document twice.
    pub fn check_integrity(&self) -> Result<()> {
        for topic in Topic::ALL {
            let count = self.entries.iter().filter(|e| e.topic == topic).count();
            if count != 1 {
                return Err(RouteError::Integrity(format!(
                    "topic '{topic}' has {count} entries"
                )));
            }
        }

        for entry in self.entries {
            if entry.documents.is_empty() {
                return Err(RouteError::Integrity(format!(
                    "topic '{}' routes to no documents",
                    entry.topic
                )));
            }

            let mut seen = HashSet::new();
            if let Some(dup) = entry.documents.iter().find(|doc| !seen.insert(**doc)) {
                return Err(RouteError::Integrity(format!(
                    "topic '{}' lists '{}' more than once",
                    entry.topic, dup
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_consistent() {
        let table = RoutingTable::builtin();
        assert_eq!(table.len(), Topic::ALL.len());
        assert!(table.check_integrity().is_ok());
    }

    #[test]
    fn test_topics_in_authored_order() {
        let topics: Vec<_> = RoutingTable::builtin().topics().collect();
        assert_eq!(topics, Topic::ALL.to_vec());
    }

    #[test]
    fn test_integrity_rejects_empty_entry() {
        let mut entries = ENTRIES;
        entries[8] = RoutingEntry::new(Topic::Testing, &[]);
        let leaked: &'static [RoutingEntry] = Box::leak(Box::new(entries));
        let table = RoutingTable { entries: leaked };

        assert_eq!(
            table.check_integrity(),
            Err(RouteError::Integrity("topic 'testing' routes to no documents".into()))
        );
    }

    #[test]
    fn test_integrity_rejects_missing_topic() {
        let leaked: &'static [RoutingEntry] = Box::leak(Box::new(ENTRIES));
        let table = RoutingTable {
            entries: &leaked[..9],
        };
        assert_eq!(
            table.check_integrity(),
            Err(RouteError::Integrity(
                "topic 'build-and-runtime-errors' has 0 entries".into()
            ))
        );
    }

    #[test]
    fn test_integrity_rejects_duplicate_document() {
        let mut entries = ENTRIES;
        entries[8] = RoutingEntry::new(Topic::Testing, &[TestingIntents, TestingIntents]);
        let leaked: &'static [RoutingEntry] = Box::leak(Box::new(entries));
        let table = RoutingTable { entries: leaked };

        let err = table.check_integrity().unwrap_err();
        assert_eq!(
            err,
            RouteError::Integrity("topic 'testing' lists 'testing-intents' more than once".into())
        );
    }

    #[test]
    fn test_route_never_empty() {
        let table = RoutingTable::builtin();
        for topic in Topic::ALL {
            assert!(!table.route(topic).is_empty(), "{topic} routes nowhere");
        }
    }

    #[test]
    fn test_route_matches_lookup() {
        let table = RoutingTable::builtin();
        for topic in Topic::ALL {
            assert_eq!(table.route(topic), table.lookup(topic.as_str()).unwrap());
        }
    }
}
