//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the export engine and
//! infrastructure. Implementations live in other crates.

use crate::{Entry, IgnoreWord, Project};

/// Trait for reading a project's vocabulary
///
/// Implemented by the infrastructure layer (lexicon-store)
pub trait LexiconStore {
    /// Error type for store operations
    type Error;

    /// Get a project by its language code
    fn get_project(&self, code: &str) -> Result<Option<Project>, Self::Error>;

    /// Get the project's entries in natural storage order
    ///
    /// Each entry carries its affix letters, conjugations and variations.
    /// When `checked_only` is set, unchecked entries are left out.
    fn get_entries(&self, project: &Project, checked_only: bool) -> Result<Vec<Entry>, Self::Error>;

    /// Get the project's ignore words
    fn get_ignore_words(&self, project: &Project) -> Result<Vec<IgnoreWord>, Self::Error>;

    /// Get entries and, when requested, ignore words from one consistent view
    ///
    /// Stores that can read under a snapshot should override this so a
    /// concurrent writer never shows up halfway through a word list.
    fn get_word_sources(
        &self,
        project: &Project,
        checked_only: bool,
        include_ignore_words: bool,
    ) -> Result<(Vec<Entry>, Vec<IgnoreWord>), Self::Error> {
        let entries = self.get_entries(project, checked_only)?;
        let ignore_words = if include_ignore_words {
            self.get_ignore_words(project)?
        } else {
            Vec::new()
        };
        Ok((entries, ignore_words))
    }
}

/// Trait for generating every surface form from seed words and affix rules
///
/// Implemented by the infrastructure layer (lexicon-hunspell)
pub trait Expander {
    /// Error type for expansion
    type Error;

    /// Expand a counted word list using the given affix-rule text
    fn expand(&self, seed_words: &str, affix_rules: &str) -> Result<Vec<String>, Self::Error>;
}
