//! Export dispatch
//!
//! The single entry point the web layer calls: pick a format, aggregate,
//! expand if needed, serialize and publish.

use lexicon_domain::traits::{Expander, LexiconStore};
use lexicon_domain::{sanitize, Project};
use std::fmt;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::format::{to_counted_list, to_status_xml};
use crate::package::{read_text, PackageBuilder};
use crate::update::{render_update_notification, UPDATE_TEMPLATE};
use crate::{aggregate, ExportConfig, ExportError, ExportStore, RequestContext, WordListOptions};

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Counted word list with every surface form expanded
    Dic,
    /// `SpellingStatus` XML over the same forms as `Dic`
    Xml,
    /// Installable extension package with the tagged list and affix rules
    Oxt,
}

impl ExportFormat {
    /// File extension
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Dic => "dic",
            ExportFormat::Xml => "xml",
            ExportFormat::Oxt => "oxt",
        }
    }

    /// MIME type to serve the file with
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Dic => "text/plain; charset=utf-8",
            ExportFormat::Xml => "text/xml; charset=utf-8",
            ExportFormat::Oxt => "application/vnd.openoffice.extension",
        }
    }

    /// Suggested download file name, e.g. `kgu.oxt`
    pub fn download_name(&self, code: &str) -> String {
        format!("{}.{}", sanitize(code), self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dic" => Ok(ExportFormat::Dic),
            "xml" => Ok(ExportFormat::Xml),
            "oxt" => Ok(ExportFormat::Oxt),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Runs exports against a store and an expansion tool
///
/// Each call is independent; the only shared resource is the export
/// directory, and every write to it is atomic.
pub struct Exporter<S, E> {
    config: ExportConfig,
    store: S,
    expander: E,
    export_store: ExportStore,
    packages: PackageBuilder,
}

impl<S, E> Exporter<S, E>
where
    S: LexiconStore,
    S::Error: Display,
    E: Expander,
    E::Error: Into<ExportError>,
{
    /// Create an exporter
    pub fn new(config: ExportConfig, store: S, expander: E) -> Self {
        let export_store = ExportStore::new(&config.export_dir);
        let packages = PackageBuilder::from_config(&config);
        Self {
            config,
            store,
            expander,
            export_store,
            packages,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Export directory
    pub fn export_store(&self) -> &ExportStore {
        &self.export_store
    }

    /// Look up a project by code
    pub fn project(&self, code: &str) -> Result<Project, ExportError> {
        self.store
            .get_project(code)
            .map_err(|e| ExportError::Storage(e.to_string()))?
            .ok_or_else(|| ExportError::ProjectNotFound(code.to_string()))
    }

    /// Export a project in the given format and return the published path
    pub fn export(
        &self,
        format: ExportFormat,
        project: &Project,
        ctx: &RequestContext,
        options: WordListOptions,
    ) -> Result<PathBuf, ExportError> {
        tracing::info!(
            "Exporting {} v{} as {} ({:?})",
            project.code,
            project.version,
            format,
            options
        );
        self.export_store.ensure()?;

        let path = match format {
            ExportFormat::Dic => {
                let words = self.spellcheck_words(project, options)?;
                self.export_store
                    .publish(project, format.extension(), to_counted_list(&words).as_bytes())?
            }
            ExportFormat::Xml => {
                let words = self.spellcheck_words(project, options)?;
                self.export_store
                    .publish(project, format.extension(), to_status_xml(&words).as_bytes())?
            }
            ExportFormat::Oxt => {
                let words = aggregate(&self.store, project, options)?;
                self.packages
                    .build_archive(&self.export_store, project, &to_counted_list(&words), ctx)?
            }
        };

        tracing::info!("Export written to {}", path.display());
        Ok(path)
    }

    /// Export the package with the delivery defaults used for update downloads
    pub fn latest_package(&self, project: &Project, ctx: &RequestContext) -> Result<PathBuf, ExportError> {
        self.export(ExportFormat::Oxt, project, ctx, WordListOptions::default())
    }

    /// The word list behind the `dic` and `xml` formats
    ///
    /// With affix tags on, the tagged list is expanded through the tool so
    /// the result holds plain surface forms. With tags off, the bare
    /// aggregation is returned as is.
    pub fn spellcheck_words(&self, project: &Project, options: WordListOptions) -> Result<Vec<String>, ExportError> {
        let words = aggregate(&self.store, project, options)?;
        if !options.attach_affix_tags {
            return Ok(words);
        }

        self.expander
            .expand(&to_counted_list(&words), &project.affix_rules)
            .map_err(Into::into)
    }

    /// Render the update-check reply for an installed extension
    pub fn update_notification(&self, project: &Project, ctx: &RequestContext) -> Result<String, ExportError> {
        let template = read_text(&self.config.template_dir, UPDATE_TEMPLATE)?;
        let code = sanitize(&project.code);
        let download_url = ctx.absolute_uri(&self.config.download_url_path(&code));
        let identifier = self.config.extension_identifier_for(&code);

        tracing::debug!("Update notification for {} points at {}", project.code, download_url);
        Ok(render_update_notification(&template, project, &identifier, &download_url))
    }
}
