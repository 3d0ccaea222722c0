//! intentguide routing
//!
//! Resolves a developer goal to the reference documents worth reading, in
//! priority order.
//!
//! ## Features
//!
//! - Compile-time routing table, shared freely between threads
//! - String-keyed `lookup` with a single failure mode (`TopicNotRecognized`)
//! - Static advisory checklists
//! - Markdown rendering of the table for LLM system prompts

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod checklist;
pub mod prompt;
pub mod table;

pub use checklist::{checklist, checklists, Checklist, ChecklistKind};
pub use intentguide_types::{DocumentRef, RouteError, Topic};
pub use prompt::{render_catalogue, render_routing, render_system_prompt};
pub use table::{RoutingEntry, RoutingTable};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{DocumentRef, RouteError, RoutingEntry, RoutingTable, Topic};
}
