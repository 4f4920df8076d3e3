//! Affix-test command implementation.

use crate::cli::AffixTestArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use std::io::{self, Read};

/// Execute the affix-test command.
///
/// Runs the configured expansion tool over the given words and rules and
/// prints every generated form. A failing tool surfaces its stderr.
pub async fn execute_affix_test(args: AffixTestArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let words = read_words(&args.words)?;
    let rules = fs::read_to_string(&args.rules).map_err(|e| {
        CliError::InvalidInput(format!("Cannot read rules {}: {}", args.rules.display(), e))
    })?;

    if words.trim().is_empty() {
        return Err(CliError::InvalidInput("No words provided".to_string()));
    }

    let expander = config.export.expander();
    let forms = tokio::task::spawn_blocking(move || expander.run(&words, &rules)).await??;

    println!("{}", formatter.format_words(&forms)?);
    Ok(())
}

fn read_words(source: &str) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(source)
            .map_err(|e| CliError::InvalidInput(format!("Cannot read words {}: {}", source, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_words_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "hobol/A\n").unwrap();

        assert_eq!(read_words(path.to_str().unwrap()).unwrap(), "hobol/A\n");
    }

    #[test]
    fn test_read_words_missing_file() {
        let result = read_words("/definitely/not/here.txt");
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
