//! Update-info command implementation.

use super::with_exporter;
use crate::cli::ProjectArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the update-info command.
pub async fn execute_update_info(args: ProjectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let document = with_exporter(config, move |exporter, ctx| {
        let project = exporter.project(&args.project)?;
        Ok(exporter.update_notification(&project, ctx)?)
    })
    .await?;

    println!("{}", formatter.format_document(&document)?);
    Ok(())
}
