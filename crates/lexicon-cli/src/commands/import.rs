//! Import command implementation.

use crate::cli::ImportArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lexicon_domain::{Affix, AffixLetter, Conjugation, IgnoreWord, Project, Variation};
use lexicon_store::SqliteStore;
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};

/// Execute the import command.
pub async fn execute_import(args: ImportArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let json_data = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = &args.file {
        fs::read_to_string(file_path)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either --file or --stdin".to_string(),
        ));
    };

    let mut definition: ProjectDefinition = serde_json::from_str(&json_data)?;
    if let Some(rules_path) = &args.rules {
        definition.affix_rules = fs::read_to_string(rules_path)?;
    }

    let database = config.database.clone();
    let summary = tokio::task::spawn_blocking(move || -> Result<ImportSummary> {
        if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut store = SqliteStore::new(&database)?;
        import_project(&mut store, &definition)
    })
    .await??;

    println!(
        "{}",
        formatter.import_result(&summary.code, summary.entries, summary.ignore_words)?
    );
    Ok(())
}

/// Counts of what an import wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Project code
    pub code: String,
    /// Entries inserted
    pub entries: usize,
    /// Ignore words inserted
    pub ignore_words: usize,
}

/// Write a project definition into the store.
///
/// The project must not already exist. The import is all or nothing: if any
/// part of the definition is rejected, nothing is written.
pub fn import_project(store: &mut SqliteStore, definition: &ProjectDefinition) -> Result<ImportSummary> {
    let summary = store.in_transaction(|store| write_definition(store, definition))?;
    tracing::info!(
        "Imported {} v{} ({} entries, {} ignore words)",
        summary.code,
        definition.version,
        summary.entries,
        summary.ignore_words
    );
    Ok(summary)
}

fn write_definition(store: &mut SqliteStore, definition: &ProjectDefinition) -> Result<ImportSummary> {
    let code = definition.code.as_str();
    let project = Project::new(code, &definition.name)
        .with_version(definition.version)
        .with_affix_rules(&definition.affix_rules);
    store.insert_project(&project)?;

    for affix in &definition.affixes {
        let letter = AffixLetter::from_string(&affix.letter).map_err(CliError::InvalidInput)?;
        store.insert_affix(code, &Affix::new(letter, &affix.name, &affix.applies_to))?;
    }

    for entry in &definition.entries {
        let id = store.insert_entry(code, &entry.text, entry.checked)?;
        for c in entry.affixes.chars().filter(|c| !c.is_whitespace()) {
            let letter = AffixLetter::new(c).map_err(CliError::InvalidInput)?;
            store.tag_entry(id, letter)?;
        }
        for conjugation in &entry.conjugations {
            store.insert_conjugation(id, &Conjugation::new(&conjugation.paradigm, &conjugation.text))?;
        }
        for variation in &entry.variations {
            let variation = Variation::new(&variation.text, &variation.kind)
                .spellcheck(variation.spellcheck)
                .search(variation.search);
            store.insert_variation(id, &variation)?;
        }
    }

    for word in &definition.ignore_words {
        store.insert_ignore_word(code, &IgnoreWord::new(word))?;
    }

    Ok(ImportSummary {
        code: code.to_string(),
        entries: definition.entries.len(),
        ignore_words: definition.ignore_words.len(),
    })
}

/// Project definition accepted by the import command.
#[derive(Debug, Deserialize)]
pub struct ProjectDefinition {
    code: String,
    name: String,
    #[serde(default = "default_version")]
    version: u64,
    #[serde(default)]
    affix_rules: String,
    #[serde(default)]
    affixes: Vec<AffixDefinition>,
    #[serde(default)]
    entries: Vec<EntryDefinition>,
    #[serde(default)]
    ignore_words: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AffixDefinition {
    letter: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    applies_to: String,
}

#[derive(Debug, Deserialize)]
struct EntryDefinition {
    text: String,
    #[serde(default)]
    checked: bool,
    /// Affix letters, e.g. `"AB"`
    #[serde(default)]
    affixes: String,
    #[serde(default)]
    conjugations: Vec<ConjugationDefinition>,
    #[serde(default)]
    variations: Vec<VariationDefinition>,
}

#[derive(Debug, Deserialize)]
struct ConjugationDefinition {
    paradigm: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct VariationDefinition {
    text: String,
    #[serde(default)]
    kind: String,
    #[serde(default = "default_true")]
    spellcheck: bool,
    #[serde(default = "default_true")]
    search: bool,
}

fn default_version() -> u64 {
    1
}

fn default_true() -> bool {
    true
}
