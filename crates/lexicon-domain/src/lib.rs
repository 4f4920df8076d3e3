//! Lexicon Domain Layer
//!
//! This crate contains the domain model for the lexicon export engine.
//! It has no external dependencies and defines the records read from a
//! project's vocabulary, plus the trait interfaces the engine depends upon.
//!
//! ## Key Concepts
//!
//! - **Project**: A language being documented, identified by a short code
//! - **Entry**: A headword with its conjugations and accepted variations
//! - **Affix**: A single-letter rule class the expansion tool understands
//! - **IgnoreWord**: An irregular or foreign word kept out of the main vocabulary
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and naming rules only
//! - Storage and process implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod affix;
pub mod entry;
pub mod project;
pub mod sanitize;
pub mod traits;

// Re-exports for convenience
pub use affix::{Affix, AffixLetter, NEVER_SUGGEST_FLAG};
pub use entry::{Conjugation, Entry, EntryId, IgnoreWord, Variation};
pub use project::Project;
pub use sanitize::sanitize;
