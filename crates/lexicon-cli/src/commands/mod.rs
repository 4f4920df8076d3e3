//! Command implementations.

pub mod affix_test;
pub mod export;
pub mod import;
pub mod update_info;

pub use self::affix_test::execute_affix_test;
pub use self::export::{execute_export, execute_latest};
pub use self::import::execute_import;
pub use self::update_info::execute_update_info;

use crate::config::Config;
use crate::error::Result;
use lexicon_export::{Exporter, RequestContext};
use lexicon_hunspell::Unmunch;
use lexicon_store::SqliteStore;

/// Exporter over the SQLite store and the configured expansion tool.
pub type CliExporter = Exporter<SqliteStore, Unmunch>;

/// Open the database and build an exporter from configuration.
pub fn open_exporter(config: &Config) -> Result<CliExporter> {
    tracing::debug!("Opening database {}", config.database.display());
    let store = SqliteStore::new(&config.database)?;
    Ok(Exporter::new(config.export.clone(), store, config.export.expander()))
}

/// Run `f` against a freshly opened exporter on the blocking pool.
///
/// Exports spawn an external process and do synchronous file and database
/// I/O, so none of it runs on the async workers.
pub(crate) async fn with_exporter<T, F>(config: &Config, f: F) -> Result<T>
where
    F: FnOnce(&CliExporter, &RequestContext) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let config = config.clone();
    tokio::task::spawn_blocking(move || {
        let exporter = open_exporter(&config)?;
        let ctx = RequestContext::new(config.base_url.clone());
        f(&exporter, &ctx)
    })
    .await?
}
