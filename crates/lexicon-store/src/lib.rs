//! Lexicon Storage Layer
//!
//! Implements the LexiconStore trait using SQLite.
//!
//! # Architecture
//!
//! - One row per project, entry, affix, conjugation, variation and ignore word
//! - Natural ordering is insertion order (row id)
//! - Entry affix letters are returned alphabetically
//!
//! # Examples
//!
//! ```no_run
//! use lexicon_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for vocabulary operations
//! ```

#![warn(missing_docs)]

use lexicon_domain::entry::normalize_text;
use lexicon_domain::traits::LexiconStore;
use lexicon_domain::{
    Affix, AffixLetter, Conjugation, Entry, EntryId, IgnoreWord, Project, Variation,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Duplicate record
    #[error("Duplicate: {0}")]
    Duplicate(String),
}

/// SQLite-based implementation of LexiconStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance; the store can be moved between threads.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Run `f` as a single transaction
    ///
    /// Everything `f` writes is committed together, or rolled back if it
    /// returns an error, so a failed multi-step load leaves no rows behind.
    pub fn in_transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.conn
            .execute_batch("BEGIN IMMEDIATE")
            .map_err(StoreError::from)?;

        let result = f(self);
        let outcome = match &result {
            Ok(_) => self.conn.execute_batch("COMMIT"),
            Err(_) => self.conn.execute_batch("ROLLBACK"),
        };

        if let Err(e) = outcome {
            if !self.conn.is_autocommit() {
                let _ = self.conn.execute_batch("ROLLBACK");
            }
            tracing::error!("Transaction did not complete: {}", e);
            if result.is_ok() {
                return Err(StoreError::from(e).into());
            }
        }
        result
    }

    /// Insert a new project
    pub fn insert_project(&mut self, project: &Project) -> Result<(), StoreError> {
        if self.project_exists(&project.code)? {
            return Err(StoreError::Duplicate(format!("project {}", project.code)));
        }

        self.conn.execute(
            "INSERT INTO projects (code, name, version, affix_rules) VALUES (?1, ?2, ?3, ?4)",
            params![
                &project.code,
                &project.name,
                project.version as i64,
                &project.affix_rules,
            ],
        )?;
        Ok(())
    }

    /// Insert an entry; the text is normalized to lower case
    pub fn insert_entry(&mut self, code: &str, text: &str, checked: bool) -> Result<EntryId, StoreError> {
        self.require_project(code)?;
        let text = normalize_text(text);
        if text.is_empty() {
            return Err(StoreError::InvalidData("entry text is empty".to_string()));
        }

        let exists: bool = self
            .conn
            .query_row(
                "SELECT 1 FROM entries WHERE project = ?1 AND text = ?2",
                params![code, &text],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if exists {
            return Err(StoreError::Duplicate(format!("entry '{}' in {}", text, code)));
        }

        self.conn.execute(
            "INSERT INTO entries (project, text, checked) VALUES (?1, ?2, ?3)",
            params![code, &text, checked],
        )?;
        Ok(EntryId::from_value(self.conn.last_insert_rowid()))
    }

    /// Mark an entry as checked or unchecked
    pub fn set_checked(&mut self, entry: EntryId, checked: bool) -> Result<(), StoreError> {
        let updated = self.conn.execute(
            "UPDATE entries SET checked = ?1 WHERE id = ?2",
            params![checked, entry.value()],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("entry {}", entry)));
        }
        Ok(())
    }

    /// Define an affix for a project
    pub fn insert_affix(&mut self, code: &str, affix: &Affix) -> Result<(), StoreError> {
        self.require_project(code)?;
        let letter = affix.letter.to_string();

        let exists: bool = self
            .conn
            .query_row(
                "SELECT 1 FROM affixes WHERE project = ?1 AND letter = ?2",
                params![code, &letter],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if exists {
            return Err(StoreError::Duplicate(format!("affix {} in {}", letter, code)));
        }

        self.conn.execute(
            "INSERT INTO affixes (project, letter, name, applies_to) VALUES (?1, ?2, ?3, ?4)",
            params![code, &letter, &affix.name, &affix.applies_to],
        )?;
        Ok(())
    }

    /// Tag an entry with one of its project's affixes
    pub fn tag_entry(&mut self, entry: EntryId, letter: AffixLetter) -> Result<(), StoreError> {
        let letter = letter.to_string();
        let defined: bool = self
            .conn
            .query_row(
                "SELECT 1 FROM entries e JOIN affixes a ON a.project = e.project
                 WHERE e.id = ?1 AND a.letter = ?2",
                params![entry.value(), &letter],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if !defined {
            return Err(StoreError::NotFound(format!(
                "affix {} for entry {}",
                letter, entry
            )));
        }

        self.conn.execute(
            "INSERT OR IGNORE INTO entry_affixes (entry_id, letter) VALUES (?1, ?2)",
            params![entry.value(), &letter],
        )?;
        Ok(())
    }

    /// Add a conjugated form to an entry
    pub fn insert_conjugation(&mut self, entry: EntryId, conjugation: &Conjugation) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO conjugations (entry_id, paradigm, text) VALUES (?1, ?2, ?3)",
            params![entry.value(), &conjugation.paradigm, &conjugation.text],
        )?;
        Ok(())
    }

    /// Add a variation to an entry
    pub fn insert_variation(&mut self, entry: EntryId, variation: &Variation) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO variations (entry_id, text, kind, included_in_spellcheck, included_in_search)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.value(),
                &variation.text,
                &variation.kind,
                variation.included_in_spellcheck,
                variation.included_in_search,
            ],
        )?;
        Ok(())
    }

    /// Add an ignore word to a project
    pub fn insert_ignore_word(&mut self, code: &str, word: &IgnoreWord) -> Result<(), StoreError> {
        self.require_project(code)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO ignore_words (project, text) VALUES (?1, ?2)",
            params![code, &word.text],
        )?;
        Ok(())
    }

    /// Replace a project's affix-rule text
    pub fn set_affix_rules(&mut self, code: &str, rules: &str) -> Result<(), StoreError> {
        let updated = self.conn.execute(
            "UPDATE projects SET affix_rules = ?1 WHERE code = ?2",
            params![rules, code],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("project {}", code)));
        }
        Ok(())
    }

    /// Increment a project's version and return the new value
    pub fn bump_version(&mut self, code: &str) -> Result<u64, StoreError> {
        let updated = self.conn.execute(
            "UPDATE projects SET version = version + 1 WHERE code = ?1",
            params![code],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("project {}", code)));
        }

        let version: i64 = self.conn.query_row(
            "SELECT version FROM projects WHERE code = ?1",
            params![code],
            |row| row.get(0),
        )?;
        tracing::debug!("Project {} bumped to version {}", code, version);
        Ok(version as u64)
    }

    fn project_exists(&self, code: &str) -> Result<bool, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT 1 FROM projects WHERE code = ?1", params![code], |_| Ok(true))
            .optional()?
            .unwrap_or(false))
    }

    fn require_project(&self, code: &str) -> Result<(), StoreError> {
        if self.project_exists(code)? {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("project {}", code)))
        }
    }

    // Reads inside one deferred transaction see a single database state.
    // Inside an open transaction the reads already share its view.
    fn read_snapshot<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Self) -> Result<T, StoreError>,
    {
        if !self.conn.is_autocommit() {
            return f(self);
        }

        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }

    fn load_entries(&self, project: &Project, checked_only: bool) -> Result<Vec<Entry>, StoreError> {
        let mut sql = String::from("SELECT id, text, checked FROM entries WHERE project = ?1");
        if checked_only {
            sql.push_str(" AND checked = 1");
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![&project.code], |row| {
                Ok((
                    EntryId::from_value(row.get(0)?),
                    row.get::<_, String>(1)?,
                    row.get::<_, bool>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut entries = Vec::with_capacity(rows.len());
        for (id, text, checked) in rows {
            entries.push(Entry {
                id,
                text,
                checked,
                affixes: self.load_affixes(id)?,
                conjugations: self.load_conjugations(id)?,
                variations: self.load_spellcheck_variations(id)?,
            });
        }
        Ok(entries)
    }

    fn load_ignore_words(&self, project: &Project) -> Result<Vec<IgnoreWord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT text FROM ignore_words WHERE project = ?1 ORDER BY id")?;
        let words = stmt
            .query_map(params![&project.code], |row| Ok(IgnoreWord { text: row.get(0)? }))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(words)
    }

    fn load_affixes(&self, entry: EntryId) -> Result<Vec<AffixLetter>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT letter FROM entry_affixes WHERE entry_id = ?1 ORDER BY letter")?;
        let letters = stmt
            .query_map(params![entry.value()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        letters
            .iter()
            .map(|l| AffixLetter::from_string(l).map_err(StoreError::InvalidData))
            .collect()
    }

    fn load_conjugations(&self, entry: EntryId) -> Result<Vec<Conjugation>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT paradigm, text FROM conjugations WHERE entry_id = ?1 ORDER BY id")?;
        let conjugations = stmt
            .query_map(params![entry.value()], |row| {
                Ok(Conjugation {
                    paradigm: row.get(0)?,
                    text: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(conjugations)
    }

    fn load_spellcheck_variations(&self, entry: EntryId) -> Result<Vec<Variation>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT text, kind, included_in_spellcheck, included_in_search
             FROM variations WHERE entry_id = ?1 AND included_in_spellcheck = 1 ORDER BY id",
        )?;
        let variations = stmt
            .query_map(params![entry.value()], |row| {
                Ok(Variation {
                    text: row.get(0)?,
                    kind: row.get(1)?,
                    included_in_spellcheck: row.get(2)?,
                    included_in_search: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(variations)
    }
}

impl LexiconStore for SqliteStore {
    type Error = StoreError;

    fn get_project(&self, code: &str) -> Result<Option<Project>, Self::Error> {
        let project = self
            .conn
            .query_row(
                "SELECT code, name, version, affix_rules FROM projects WHERE code = ?1",
                params![code],
                |row| {
                    Ok(Project {
                        code: row.get(0)?,
                        name: row.get(1)?,
                        version: row.get::<_, i64>(2)? as u64,
                        affix_rules: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(project)
    }

    fn get_entries(&self, project: &Project, checked_only: bool) -> Result<Vec<Entry>, Self::Error> {
        self.read_snapshot(|store| store.load_entries(project, checked_only))
    }

    fn get_ignore_words(&self, project: &Project) -> Result<Vec<IgnoreWord>, Self::Error> {
        self.load_ignore_words(project)
    }

    fn get_word_sources(
        &self,
        project: &Project,
        checked_only: bool,
        include_ignore_words: bool,
    ) -> Result<(Vec<Entry>, Vec<IgnoreWord>), Self::Error> {
        self.read_snapshot(|store| {
            let entries = store.load_entries(project, checked_only)?;
            let ignore_words = if include_ignore_words {
                store.load_ignore_words(project)?
            } else {
                Vec::new()
            };
            Ok((entries, ignore_words))
        })
    }
}
