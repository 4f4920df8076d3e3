//! Lexicon Export Engine
//!
//! Turns a project's stored vocabulary into downloadable spell-checker
//! artifacts.
//!
//! # Overview
//!
//! An export runs in a single pass on the calling thread:
//!
//! 1. **Aggregate** entries, conjugations, variations and ignore words
//!    into a word list, optionally tagged with affix letters
//! 2. **Expand** the tagged list through `unmunch` (plain `.dic` and `.xml`)
//! 3. **Serialize** as a counted list, a status XML, or an `.oxt` package
//! 4. **Publish** to the export directory under `<code>_<version>.<ext>`
//!
//! | Format | Contents |
//! |--------|----------|
//! | `dic` | Counted list of every surface form |
//! | `xml` | `SpellingStatus` document over the same forms |
//! | `oxt` | Extension package with the tagged `.dic` and the project's `.aff` |
//!
//! # Usage
//!
//! ```no_run
//! use lexicon_export::{ExportConfig, ExportFormat, Exporter, RequestContext, WordListOptions};
//! use lexicon_hunspell::Unmunch;
//! use lexicon_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExportConfig::default();
//! let store = SqliteStore::new("lexicon.db")?;
//! let exporter = Exporter::new(config.clone(), store, config.expander());
//!
//! let project = exporter.project("kgu")?;
//! let ctx = RequestContext::new("https://lexicon.example.org");
//! let path = exporter.export(ExportFormat::Oxt, &project, &ctx, WordListOptions::default())?;
//! println!("{}", path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! export_dir = "data/exports"
//! template_dir = "templates/oxt"
//! unmunch_command = "unmunch"
//! unmunch_args = []
//! expansion_timeout_secs = 60
//! default_count = 100
//! update_path = "/lexicon/{code}/oxt-update"
//! download_path = "/lexicon/{code}/latest-oxt"
//! extension_identifier = "NTMPNG {code} extension"
//! ```

#![warn(missing_docs)]

mod aggregate;
mod config;
mod error;
mod exporter;
pub mod format;
mod package;
mod request;
mod store;
mod update;

pub use aggregate::{aggregate, flatten, WordListOptions};
pub use config::ExportConfig;
pub use error::ExportError;
pub use exporter::{ExportFormat, Exporter};
pub use package::{PackageBuilder, Templates};
pub use request::RequestContext;
pub use store::ExportStore;
pub use update::render_update_notification;
