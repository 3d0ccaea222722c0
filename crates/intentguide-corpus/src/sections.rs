//! Reading the routing and checklist sections of `SKILL.md`
//!
//! `SKILL.md` carries the same routing table and checklists as the library,
//! written as Markdown. These parsers pull them back out so the two copies can
//! be compared.

use anyhow::{anyhow, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Heading of the routing section
pub const ROUTING_HEADING: &str = "## Task-based routing";
/// Heading of the checklist section
pub const CHECKLISTS_HEADING: &str = "## Checklists";

// ### Create your first App Intent (`first-intent`)
static TOPIC_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^###\s+.*\(`([a-z0-9-]+)`\)\s*$"));

// 1. `references/intent-fundamentals.md`
static DOC_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+`references/([a-z0-9-]+)\.md`"));

/// One routing heading and the document ids listed under it, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingSection {
    /// Topic id from the heading
    pub topic: String,
    /// Document ids in the order they are numbered
    pub documents: Vec<String>,
}

/// One checklist heading and its items with Markdown code spans removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistSection {
    /// Heading text
    pub title: String,
    /// Items in file order
    pub items: Vec<String>,
}

fn pattern(re: &'static LazyLock<Result<Regex, regex::Error>>) -> Result<&'static Regex> {
    re.as_ref()
        .map_err(|e| anyhow!("Failed to compile regex: {}", e))
}

/// Lines between `heading` and the next level-two heading
fn section<'a>(body: &'a str, heading: &'a str) -> impl Iterator<Item = &'a str> {
    body.lines()
        .skip_while(move |line| line.trim_end() != heading)
        .skip(1)
        .take_while(|line| !line.starts_with("## "))
}

/// Parse the "Task-based routing" section
pub fn parse_routing(body: &str) -> Result<Vec<RoutingSection>> {
    let topic_re = pattern(&TOPIC_RE)?;
    let doc_re = pattern(&DOC_RE)?;
    let mut sections: Vec<RoutingSection> = Vec::new();

    for line in section(body, ROUTING_HEADING) {
        let line = line.trim_end();
        if let Some(caps) = topic_re.captures(line) {
            sections.push(RoutingSection {
                topic: caps[1].to_string(),
                documents: Vec::new(),
            });
        } else if let Some(caps) = doc_re.captures(line) {
            let current = sections
                .last_mut()
                .ok_or_else(|| anyhow!("Document listed before any topic: {}", line))?;
            current.documents.push(caps[1].to_string());
        }
    }

    Ok(sections)
}

/// Parse the "Checklists" section
pub fn parse_checklists(body: &str) -> Vec<ChecklistSection> {
    let mut lists: Vec<ChecklistSection> = Vec::new();

    for line in section(body, CHECKLISTS_HEADING) {
        let line = line.trim_end();
        if let Some(title) = line.strip_prefix("### ") {
            lists.push(ChecklistSection {
                title: title.trim().to_string(),
                items: Vec::new(),
            });
        } else if let Some(item) = line.strip_prefix("- ") {
            if let Some(current) = lists.last_mut() {
                current.items.push(item.replace('`', ""));
            }
        }
    }

    lists
}
