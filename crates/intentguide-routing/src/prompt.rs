//! Markdown rendering of the routing table for LLM system prompts

use intentguide_types::DocumentRef;
use std::fmt::Write;

use crate::table::RoutingTable;

/// Render the "Task-based routing" section
///
/// Format:
/// ### Create your first App Intent (`first-intent`)
/// 1. `intent-fundamentals`: AppIntent protocol, ...
/// 2. `shortcuts-provider`: AppShortcutsProvider, ...
#[must_use]
pub fn render_routing(table: &RoutingTable) -> String {
    let mut out = String::from("## Task-based routing\n");

    for entry in table.entries() {
        let _ = write!(
            out,
            "\n### {} (`{}`)\n",
            entry.topic.summary(),
            entry.topic
        );
        for (i, doc) in entry.documents.iter().enumerate() {
            let _ = writeln!(out, "{}. `{}`: {}", i + 1, doc, doc.description());
        }
    }

    out
}

/// Render the reference document catalogue
#[must_use]
pub fn render_catalogue() -> String {
    let mut out = String::from("## Reference files\n\n");
    for doc in DocumentRef::ALL {
        let _ = writeln!(
            out,
            "- `references/{}`: {}",
            doc.file_name(),
            doc.description()
        );
    }
    out
}

/// Render the full routing prompt: an introduction, the routing section and
/// the catalogue
#[must_use]
pub fn render_system_prompt(table: &RoutingTable) -> String {
    format!(
        "Pick the topic closest to the developer's goal and read its documents in order. \
         If no topic fits, consult the reference files below directly.\n\n{}\n{}",
        render_routing(table),
        render_catalogue()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_lists_every_topic() {
        let md = render_routing(RoutingTable::builtin());
        assert_eq!(md.matches("\n### ").count(), 10);
        assert!(md.contains(
            "### Migrate from SiriKit custom intents (`sirikit-migration`)\n\
             1. `migration-from-sirikit`: "
        ));
    }

    #[test]
    fn test_catalogue_lists_every_document() {
        let md = render_catalogue();
        assert_eq!(md.lines().filter(|l| l.starts_with("- ")).count(), 11);
        assert!(md.contains("- `references/common-pitfalls.md`: "));
    }

    #[test]
    fn test_system_prompt_is_deterministic() {
        let table = RoutingTable::builtin();
        assert_eq!(render_system_prompt(table), render_system_prompt(table));
    }
}
