//! Entry module - headwords and the surface forms attached to them

use crate::AffixLetter;
use std::fmt;

/// Storage identifier for an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(i64);

impl EntryId {
    /// Create an EntryId from a raw storage key
    pub fn from_value(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw storage key
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A primary dictionary headword belonging to a project
///
/// `conjugations` and `variations` are in storage order. The affix letters
/// are applied to every surface form the entry emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Storage identifier
    pub id: EntryId,

    /// Normalized (lower-case) surface text
    pub text: String,

    /// Whether a reviewer has checked this entry
    pub checked: bool,

    /// Affix rule classes tagged on this entry
    pub affixes: Vec<AffixLetter>,

    /// Inflected forms
    pub conjugations: Vec<Conjugation>,

    /// Accepted alternate spellings
    pub variations: Vec<Variation>,
}

impl Entry {
    /// Create an entry with no tags, conjugations or variations
    pub fn new(id: EntryId, text: impl AsRef<str>, checked: bool) -> Self {
        Self {
            id,
            text: normalize_text(text.as_ref()),
            checked,
            affixes: Vec::new(),
            conjugations: Vec::new(),
            variations: Vec::new(),
        }
    }

    /// Concatenated affix letters, e.g. `"AC"`; empty when untagged
    pub fn affix_flags(&self) -> String {
        self.affixes.iter().map(AffixLetter::as_char).collect()
    }

    /// Variations flagged for inclusion in spell-check output
    pub fn spellcheck_variations(&self) -> impl Iterator<Item = &Variation> {
        self.variations.iter().filter(|v| v.included_in_spellcheck)
    }
}

/// One inflected surface form of an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conjugation {
    /// Paradigm the form belongs to
    pub paradigm: String,

    /// Inflected surface text
    pub text: String,
}

impl Conjugation {
    /// Create a new conjugation
    pub fn new(paradigm: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            paradigm: paradigm.into(),
            text: text.into(),
        }
    }
}

/// An accepted alternate spelling or dialect form of an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variation {
    /// Surface text
    pub text: String,

    /// Variation type tag (e.g. `spelling`, `dialect`)
    pub kind: String,

    /// Included in spell-check exports
    pub included_in_spellcheck: bool,

    /// Included in dictionary search
    pub included_in_search: bool,
}

impl Variation {
    /// Create a variation included in both spell check and search
    pub fn new(text: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
            included_in_spellcheck: true,
            included_in_search: true,
        }
    }

    /// Set spell-check inclusion
    pub fn spellcheck(mut self, included: bool) -> Self {
        self.included_in_spellcheck = included;
        self
    }

    /// Set search inclusion
    pub fn search(mut self, included: bool) -> Self {
        self.included_in_search = included;
        self
    }
}

/// An irregular or foreign word tracked outside the main vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreWord {
    /// Surface text
    pub text: String,
}

impl IgnoreWord {
    /// Create a new ignore word
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Normalize headword text: trimmed and lower-cased
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(c: char) -> AffixLetter {
        AffixLetter::new(c).unwrap()
    }

    #[test]
    fn test_entry_text_is_normalized() {
        let entry = Entry::new(EntryId::from_value(1), "  Walk ", true);
        assert_eq!(entry.text, "walk");
    }

    #[test]
    fn test_affix_flags_concatenate_in_order() {
        let mut entry = Entry::new(EntryId::from_value(1), "walk", true);
        assert_eq!(entry.affix_flags(), "");

        entry.affixes = vec![letter('A'), letter('C')];
        assert_eq!(entry.affix_flags(), "AC");
    }

    #[test]
    fn test_spellcheck_variations_filter() {
        let mut entry = Entry::new(EntryId::from_value(1), "colour", false);
        entry.variations = vec![
            Variation::new("color", "spelling"),
            Variation::new("culla", "dialect").spellcheck(false),
        ];

        let texts: Vec<&str> = entry.spellcheck_variations().map(|v| v.text.as_str()).collect();
        assert_eq!(texts, vec!["color"]);
    }
}
