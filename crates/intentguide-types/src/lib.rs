//! intentguide types - shared vocabulary for the App Intents reference router
//!
//! Every routing key and every reference document is a closed enum with a
//! stable kebab-case identifier. The identifier is what appears in `SKILL.md`,
//! on the command line, and in JSON output.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod document;
pub mod error;
pub mod topic;

pub use document::DocumentRef;
pub use error::{Result, RouteError};
pub use topic::Topic;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{DocumentRef, RouteError, Topic};
}
