//! Lexicon stores
//!
//! The lookup engine only needs exact-key lookups against either the
//! simplified or the traditional form. `SqliteLexicon` keeps the full
//! CC-CEDICT in an indexed table built once from the source file;
//! `MemoryLexicon` serves small word lists and tests.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use super::cedict::{CedictParser, ImportReport};
use super::models::LexiconEntry;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid CEDICT pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("CC-CEDICT file not found at {0}")]
    SourceNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, DictionaryError>;

/// Exact-match lookup by simplified or traditional text
pub trait LexiconStore {
    fn lookup(&self, key: &str) -> Result<Option<LexiconEntry>>;
}

impl<L: LexiconStore + ?Sized> LexiconStore for Box<L> {
    fn lookup(&self, key: &str) -> Result<Option<LexiconEntry>> {
        (**self).lookup(key)
    }
}

/// CC-CEDICT indexed in SQLite
pub struct SqliteLexicon {
    conn: Connection,
}

impl SqliteLexicon {
    /// Open the index at `db_path`, building it from `cedict_path` on first use.
    ///
    /// A missing CEDICT file is fatal only when the index has to be built.
    pub fn open(db_path: &Path, cedict_path: &Path) -> Result<Self> {
        if db_path.exists() {
            log::info!("Using existing dictionary database at {}", db_path.display());
            let conn = Connection::open(db_path)?;
            let lexicon = Self { conn };
            lexicon.create_schema()?;
            return Ok(lexicon);
        }

        let (lexicon, _) = Self::build(db_path, cedict_path)?;
        Ok(lexicon)
    }

    /// Drop any existing index and rebuild it from the source file.
    pub fn rebuild(db_path: &Path, cedict_path: &Path) -> Result<(Self, ImportReport)> {
        if !cedict_path.exists() {
            return Err(DictionaryError::SourceNotFound(cedict_path.to_path_buf()));
        }
        if db_path.exists() {
            fs::remove_file(db_path)?;
        }
        Self::build(db_path, cedict_path)
    }

    fn build(db_path: &Path, cedict_path: &Path) -> Result<(Self, ImportReport)> {
        if !cedict_path.exists() {
            return Err(DictionaryError::SourceNotFound(cedict_path.to_path_buf()));
        }
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        log::info!("Creating new dictionary database at {}", db_path.display());
        let built = Connection::open(db_path)
            .map_err(DictionaryError::from)
            .and_then(|conn| {
                let mut lexicon = Self { conn };
                lexicon.create_schema()?;
                let report = lexicon.import_file(cedict_path)?;
                Ok((lexicon, report))
            });

        if built.is_err() {
            // Leave nothing behind so the next start retries the import
            let _ = fs::remove_file(db_path);
        }
        built
    }

    /// An empty index that lives only in memory
    pub fn in_memory() -> Result<Self> {
        let lexicon = Self {
            conn: Connection::open_in_memory()?,
        };
        lexicon.create_schema()?;
        Ok(lexicon)
    }

    fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                traditional TEXT NOT NULL,
                simplified TEXT NOT NULL,
                pinyin TEXT NOT NULL,
                definitions TEXT NOT NULL,
                PRIMARY KEY (simplified, traditional)
            );

            CREATE INDEX IF NOT EXISTS idx_simplified ON entries(simplified);
            CREATE INDEX IF NOT EXISTS idx_traditional ON entries(traditional);
            "#,
        )?;
        Ok(())
    }

    /// Load a CEDICT file into the index
    pub fn import_file(&mut self, cedict_path: &Path) -> Result<ImportReport> {
        log::info!("Loading dictionary data from {}", cedict_path.display());
        let file = File::open(cedict_path)?;
        let parser = CedictParser::new()?;
        let (entries, report) = parser.parse_reader(BufReader::new(file))?;

        self.insert_entries(&entries)?;
        log::info!(
            "Loaded {} dictionary entries ({} malformed lines skipped)",
            report.loaded,
            report.skipped
        );
        Ok(report)
    }

    /// Insert or replace entries in a single transaction
    pub fn insert_entries(&mut self, entries: &[LexiconEntry]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO entries (traditional, simplified, pinyin, definitions) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for entry in entries {
                stmt.execute(params![
                    entry.traditional,
                    entry.simplified,
                    entry.pinyin_numeric,
                    entry.raw_definitions(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(entries.len())
    }

    /// Number of indexed entries
    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl LexiconStore for SqliteLexicon {
    fn lookup(&self, key: &str) -> Result<Option<LexiconEntry>> {
        let entry = self
            .conn
            .query_row(
                "SELECT traditional, simplified, pinyin, definitions FROM entries
                 WHERE simplified = ?1 OR traditional = ?1
                 ORDER BY rowid LIMIT 1",
                params![key],
                |row| {
                    let raw: String = row.get(3)?;
                    Ok(LexiconEntry::from_raw(
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        &raw,
                    ))
                },
            )
            .optional()?;
        Ok(entry)
    }
}

/// Lexicon held in memory. The first inserted entry wins when a key
/// matches several entries, mirroring the SQLite row order.
#[derive(Debug, Default, Clone)]
pub struct MemoryLexicon {
    entries: Vec<LexiconEntry>,
    by_pair: HashMap<(String, String), usize>,
    by_key: HashMap<String, usize>,
}

impl MemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing one with the same simplified/traditional pair.
    ///
    /// A replaced entry moves to the back, as `INSERT OR REPLACE` gives the
    /// new row a fresh rowid.
    pub fn insert(&mut self, entry: LexiconEntry) {
        let pair = (entry.simplified.clone(), entry.traditional.clone());
        if let Some(idx) = self.by_pair.get(&pair).copied() {
            self.entries.remove(idx);
            self.entries.push(entry);
            self.reindex();
            return;
        }

        let idx = self.entries.len();
        self.index_entry(idx, &entry);
        self.entries.push(entry);
    }

    fn index_entry(&mut self, idx: usize, entry: &LexiconEntry) {
        self.by_key.entry(entry.simplified.clone()).or_insert(idx);
        self.by_key.entry(entry.traditional.clone()).or_insert(idx);
        self.by_pair
            .insert((entry.simplified.clone(), entry.traditional.clone()), idx);
    }

    fn reindex(&mut self) {
        self.by_key.clear();
        self.by_pair.clear();
        let entries = std::mem::take(&mut self.entries);
        for (idx, entry) in entries.iter().enumerate() {
            self.index_entry(idx, entry);
        }
        self.entries = entries;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<LexiconEntry> for MemoryLexicon {
    fn from_iter<I: IntoIterator<Item = LexiconEntry>>(iter: I) -> Self {
        let mut lexicon = Self::new();
        for entry in iter {
            lexicon.insert(entry);
        }
        lexicon
    }
}

impl LexiconStore for MemoryLexicon {
    fn lookup(&self, key: &str) -> Result<Option<LexiconEntry>> {
        Ok(self.by_key.get(key).map(|&idx| self.entries[idx].clone()))
    }
}
