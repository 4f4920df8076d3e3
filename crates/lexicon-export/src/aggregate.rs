//! Word list aggregation
//!
//! Collects every surface form a project contributes to a spell-check
//! export. Order is entry by entry in storage order; within an entry the
//! base text comes first, then conjugations, then spell-check variations.
//! Ignore words follow all entries.

use lexicon_domain::traits::LexiconStore;
use lexicon_domain::{Entry, IgnoreWord, Project, NEVER_SUGGEST_FLAG};
use std::fmt::Display;

use crate::ExportError;

/// Inclusion rules for a word list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordListOptions {
    /// Only include checked entries
    pub checked_only: bool,

    /// Suffix each form with `/<affix letters>` (and ignore words with `/!`)
    pub attach_affix_tags: bool,

    /// Append the project's ignore words
    pub include_ignore_words: bool,
}

impl Default for WordListOptions {
    /// Checked entries, tagged, with ignore words
    fn default() -> Self {
        Self {
            checked_only: true,
            attach_affix_tags: true,
            include_ignore_words: true,
        }
    }
}

impl WordListOptions {
    /// Same options with affix tags turned off
    pub fn untagged(self) -> Self {
        Self {
            attach_affix_tags: false,
            ..self
        }
    }
}

/// Build a project's word list from the store
///
/// Returns an empty list for a project with no matching entries.
pub fn aggregate<S>(store: &S, project: &Project, options: WordListOptions) -> Result<Vec<String>, ExportError>
where
    S: LexiconStore,
    S::Error: Display,
{
    let (entries, ignore_words) = store
        .get_word_sources(project, options.checked_only, options.include_ignore_words)
        .map_err(|e| ExportError::Storage(e.to_string()))?;

    let words = flatten(&entries, &ignore_words, options);
    tracing::debug!(
        "Aggregated {} words from {} entries for {}",
        words.len(),
        entries.len(),
        project.code
    );
    Ok(words)
}

/// Flatten already-fetched records into a word list
pub fn flatten(entries: &[Entry], ignore_words: &[IgnoreWord], options: WordListOptions) -> Vec<String> {
    let mut words = Vec::new();

    for entry in entries.iter().filter(|e| e.checked || !options.checked_only) {
        let flags = if options.attach_affix_tags {
            entry.affix_flags()
        } else {
            String::new()
        };

        words.push(tag(&entry.text, &flags));

        let forms = entry
            .conjugations
            .iter()
            .map(|c| c.text.as_str())
            .chain(entry.spellcheck_variations().map(|v| v.text.as_str()))
            .filter(|text| !text.trim().is_empty());
        words.extend(forms.map(|text| tag(text, &flags)));
    }

    if options.include_ignore_words {
        let flag = if options.attach_affix_tags {
            NEVER_SUGGEST_FLAG
        } else {
            ""
        };
        words.extend(ignore_words.iter().map(|w| tag(&w.text, flag)));
    }

    words
}

fn tag(text: &str, flags: &str) -> String {
    if flags.is_empty() {
        text.to_string()
    } else {
        format!("{}/{}", text, flags)
    }
}
