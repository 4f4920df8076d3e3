//! Affix module - single-letter rule classes for the expansion tool

use std::fmt;

/// Reserved flag telling the spell checker never to suggest a word
pub const NEVER_SUGGEST_FLAG: &str = "!";

/// An affix flag letter, always an uppercase ASCII letter `A`-`Z`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AffixLetter(char);

impl AffixLetter {
    /// Create a new affix letter
    ///
    /// # Errors
    /// Returns error if the letter is not `A`-`Z`
    ///
    /// # Examples
    ///
    /// ```
    /// use lexicon_domain::AffixLetter;
    ///
    /// assert!(AffixLetter::new('A').is_ok());
    /// assert!(AffixLetter::new('a').is_err());
    /// ```
    pub fn new(letter: char) -> Result<Self, String> {
        if letter.is_ascii_uppercase() {
            Ok(Self(letter))
        } else {
            Err(format!("Affix letter must be A-Z, got '{}'", letter))
        }
    }

    /// Parse a letter from a one-character string
    pub fn from_string(s: &str) -> Result<Self, String> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(format!("Affix letter must be a single character, got '{}'", s)),
        }
    }

    /// Get the letter as a char
    pub fn as_char(&self) -> char {
        self.0
    }
}

impl fmt::Display for AffixLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An affix rule class defined for a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affix {
    /// Flag letter, unique per project
    pub letter: AffixLetter,

    /// Human-readable name
    pub name: String,

    /// Part of speech the rule applies to
    pub applies_to: String,
}

impl Affix {
    /// Create a new affix
    pub fn new(letter: AffixLetter, name: impl Into<String>, applies_to: impl Into<String>) -> Self {
        Self {
            letter,
            name: name.into(),
            applies_to: applies_to.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_validation() {
        assert_eq!(AffixLetter::new('Z').unwrap().as_char(), 'Z');
        assert!(AffixLetter::new('z').is_err());
        assert!(AffixLetter::new('!').is_err());
        assert!(AffixLetter::new('Ä').is_err());
    }

    #[test]
    fn test_letter_from_string() {
        assert_eq!(AffixLetter::from_string("B").unwrap().to_string(), "B");
        assert!(AffixLetter::from_string("").is_err());
        assert!(AffixLetter::from_string("AB").is_err());
    }

    #[test]
    fn test_letters_order_alphabetically() {
        let a = AffixLetter::new('A').unwrap();
        let c = AffixLetter::new('C').unwrap();
        assert!(a < c);
    }
}
