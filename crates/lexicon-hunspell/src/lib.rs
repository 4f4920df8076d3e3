//! Lexicon Hunspell Integration
//!
//! Wraps the external `unmunch` tool, which applies a project's affix rules
//! to a seed word list and prints every surface form it derives.
//!
//! This crate provides an implementation of the `Expander` trait from
//! `lexicon-domain`, so callers never depend on process details.
//!
//! # Examples
//!
//! ```no_run
//! use lexicon_hunspell::Unmunch;
//! use lexicon_domain::traits::Expander;
//! use std::time::Duration;
//!
//! let unmunch = Unmunch::new("unmunch").with_timeout(Duration::from_secs(30));
//! let forms = unmunch.expand("1\nwalk/A", "SET UTF-8\nSFX A Y 1\nSFX A 0 ed .").unwrap();
//! ```

#![warn(missing_docs)]

mod error;
mod header;
mod unmunch;

pub use error::ExpansionError;
pub use header::ensure_count_header;
pub use unmunch::{Unmunch, DEFAULT_COMMAND, DEFAULT_COUNT, DEFAULT_TIMEOUT};
