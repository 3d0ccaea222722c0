//! Static advisory checklists
//!
//! These are the "minimum viable" lists from the corpus. They are guidance for
//! the reader; nothing here inspects a project against them.

use intentguide_types::{Result, RouteError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which checklist to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChecklistKind {
    /// Minimum viable App Intent
    AppIntent,
    /// Minimum viable App Entity
    AppEntity,
}

impl ChecklistKind {
    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ChecklistKind::AppIntent => "app-intent",
            ChecklistKind::AppEntity => "app-entity",
        }
    }
}

impl fmt::Display for ChecklistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ChecklistKind {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "app-intent" => Ok(ChecklistKind::AppIntent),
            "app-entity" => Ok(ChecklistKind::AppEntity),
            other => Err(RouteError::ChecklistNotRecognized(other.to_string())),
        }
    }
}

/// A titled list of advisory conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Checklist {
    /// Identifier
    pub kind: ChecklistKind,
    /// Display title
    pub title: &'static str,
    /// Items in reading order
    pub items: &'static [&'static str],
}

impl Checklist {
    /// Render as a Markdown task list
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = format!("## {}\n\n", self.title);
        for item in self.items {
            out.push_str("- [ ] ");
            out.push_str(item);
            out.push('\n');
        }
        out
    }
}

const APP_INTENT: Checklist = Checklist {
    kind: ChecklistKind::AppIntent,
    title: "Minimum viable App Intent",
    items: &[
        "Struct conforms to AppIntent",
        "static let title is a LocalizedStringResource literal",
        "Every @Parameter has a title and a supported type",
        "perform() is async throws and returns some IntentResult",
        "Result includes a dialog when Siri should speak a response",
        "openAppWhenRun is set only when the intent needs the app in the foreground",
        "Intent is reachable from an AppShortcutsProvider when it should run without setup",
    ],
};

const APP_ENTITY: Checklist = Checklist {
    kind: ChecklistKind::AppEntity,
    title: "Minimum viable App Entity",
    items: &[
        "Struct conforms to AppEntity with a stable, persistent id",
        "static let typeDisplayRepresentation names the type",
        "displayRepresentation uses the entity's user-facing title",
        "static let defaultQuery points at an EntityQuery",
        "EntityQuery implements entities(for:) for the identifiers it is given",
        "suggestedEntities() returns a short list for parameter pickers",
        "EntityStringQuery is adopted when Siri must match spoken names",
    ],
};

const ALL: [Checklist; 2] = [APP_INTENT, APP_ENTITY];

/// The checklist for `kind`
#[must_use]
pub fn checklist(kind: ChecklistKind) -> &'static Checklist {
    match kind {
        ChecklistKind::AppIntent => &APP_INTENT,
        ChecklistKind::AppEntity => &APP_ENTITY,
    }
}

/// Every checklist
#[must_use]
pub fn checklists() -> &'static [Checklist] {
    &ALL
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(
            "app-entity".parse::<ChecklistKind>().unwrap(),
            ChecklistKind::AppEntity
        );
        assert_eq!(
            "app-widget".parse::<ChecklistKind>(),
            Err(RouteError::ChecklistNotRecognized("app-widget".into()))
        );
    }

    #[test]
    fn test_checklists_non_empty() {
        for list in checklists() {
            assert!(!list.items.is_empty());
            assert_eq!(checklist(list.kind), list);
        }
    }

    #[test]
    fn test_markdown_rendering() {
        let md = checklist(ChecklistKind::AppIntent).to_markdown();
        assert!(md.starts_with("## Minimum viable App Intent\n\n- [ ] "));
        assert_eq!(md.lines().filter(|l| l.starts_with("- [ ] ")).count(), 7);
    }
}
