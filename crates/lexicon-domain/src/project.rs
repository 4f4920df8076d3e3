//! Project module - the language a lexicon is built for

/// A lexicon project
///
/// The `code` is globally unique (a 3-4 letter language code). The
/// `version` increases whenever tracked linguistic content changes, which
/// is what keys exported files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Short language code (e.g. `kgu`)
    pub code: String,

    /// Human-readable language name
    pub name: String,

    /// Monotonically increasing content version
    pub version: u64,

    /// Raw affix-rule file text consumed by the expansion tool
    pub affix_rules: String,
}

impl Project {
    /// Create a new project at version 0 with no affix rules
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            version: 0,
            affix_rules: String::new(),
        }
    }

    /// Set the version
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Set the affix-rule text
    pub fn with_affix_rules(mut self, rules: impl Into<String>) -> Self {
        self.affix_rules = rules.into();
        self
    }
}
