//! Developer-goal routing keys

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RouteError;

/// A predefined category of developer goal, used as a routing key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    /// Create a first App Intent
    FirstIntent,
    /// Make app content searchable
    SearchableContent,
    /// Integrate with Siri and Apple Intelligence
    AssistantIntegration,
    /// Build interactive snippets
    InteractiveSnippets,
    /// Add App Shortcuts and Siri phrases
    ShortcutsAndPhrases,
    /// Structure an app around intents
    IntentDrivenArchitecture,
    /// Support visual intelligence search
    VisualIntelligence,
    /// Migrate from SiriKit custom intents
    SirikitMigration,
    /// Test intents
    Testing,
    /// Diagnose build and runtime errors
    BuildAndRuntimeErrors,
}

impl Topic {
    /// All topics, in the order they are authored in the routing table
    pub const ALL: [Topic; 10] = [
        Topic::FirstIntent,
        Topic::SearchableContent,
        Topic::AssistantIntegration,
        Topic::InteractiveSnippets,
        Topic::ShortcutsAndPhrases,
        Topic::IntentDrivenArchitecture,
        Topic::VisualIntelligence,
        Topic::SirikitMigration,
        Topic::Testing,
        Topic::BuildAndRuntimeErrors,
    ];

    /// Stable kebab-case identifier
    pub const fn as_str(self) -> &'static str {
        match self {
            Topic::FirstIntent => "first-intent",
            Topic::SearchableContent => "searchable-content",
            Topic::AssistantIntegration => "assistant-integration",
            Topic::InteractiveSnippets => "interactive-snippets",
            Topic::ShortcutsAndPhrases => "shortcuts-and-phrases",
            Topic::IntentDrivenArchitecture => "intent-driven-architecture",
            Topic::VisualIntelligence => "visual-intelligence",
            Topic::SirikitMigration => "sirikit-migration",
            Topic::Testing => "testing",
            Topic::BuildAndRuntimeErrors => "build-and-runtime-errors",
        }
    }

    /// The developer goal this topic stands for, phrased as a routing heading
    pub const fn summary(self) -> &'static str {
        match self {
            Topic::FirstIntent => "Create your first App Intent",
            Topic::SearchableContent => "Make app content searchable in Spotlight and Siri",
            Topic::AssistantIntegration => "Integrate with Siri and Apple Intelligence",
            Topic::InteractiveSnippets => "Build interactive snippets",
            Topic::ShortcutsAndPhrases => "Add App Shortcuts and Siri phrases",
            Topic::IntentDrivenArchitecture => "Structure the app around intents",
            Topic::VisualIntelligence => "Support visual intelligence search",
            Topic::SirikitMigration => "Migrate from SiriKit custom intents",
            Topic::Testing => "Test intents, entities and queries",
            Topic::BuildAndRuntimeErrors => "Fix build errors and runtime failures",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| RouteError::TopicNotRecognized(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_round_trip() {
        for topic in Topic::ALL {
            assert_eq!(topic.as_str().parse::<Topic>(), Ok(topic));
            assert_eq!(topic.to_string(), topic.as_str());
        }
    }

    #[test]
    fn test_display_honors_width() {
        assert_eq!(format!("{:<12}|", Topic::Testing), "testing     |");
        assert_eq!(format!("{:>9}", Topic::Testing), "  testing");
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(
            "First-Intent".parse::<Topic>(),
            Err(RouteError::TopicNotRecognized("First-Intent".into()))
        );
        assert!(" testing".parse::<Topic>().is_err());
        assert!("build-errors".parse::<Topic>().is_err());
    }

    #[test]
    fn test_serde_matches_identifier() {
        for topic in Topic::ALL {
            let json = serde_json::to_string(&topic).unwrap();
            assert_eq!(json, format!("\"{}\"", topic.as_str()));
            let back: Topic = serde_json::from_str(&json).unwrap();
            assert_eq!(back, topic);
        }
    }
}
