//! Export and latest-package commands.

use super::with_exporter;
use crate::cli::{ExportArgs, ProjectArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::{ExportSummary, Formatter};
use lexicon_export::{ExportFormat, WordListOptions};

/// Execute the export command.
pub async fn execute_export(args: ExportArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let format: ExportFormat = args.format.into();
    let options = word_list_options(&args);

    let summary = with_exporter(config, move |exporter, ctx| {
        let project = exporter.project(&args.project)?;
        let path = exporter.export(format, &project, ctx, options)?;
        Ok(ExportSummary::new(&project.code, project.version, format, path))
    })
    .await?;

    println!("{}", formatter.format_export(&summary)?);
    Ok(())
}

/// Execute the latest command.
pub async fn execute_latest(args: ProjectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let summary = with_exporter(config, move |exporter, ctx| {
        let project = exporter.project(&args.project)?;
        let path = exporter.latest_package(&project, ctx)?;
        Ok(ExportSummary::new(&project.code, project.version, ExportFormat::Oxt, path))
    })
    .await?;

    println!("{}", formatter.format_export(&summary)?);
    Ok(())
}

fn word_list_options(args: &ExportArgs) -> WordListOptions {
    WordListOptions {
        checked_only: !args.all,
        attach_affix_tags: !args.no_affixes,
        include_ignore_words: !args.no_ignore,
    }
}
