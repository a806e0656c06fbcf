//! Storage for saved words and review stats
//!
//! Two tables in one SQLite database:
//! ```text
//! saved_words(word PK, simplified, traditional, pinyin, definitions, timestamp)
//! review_stats(word PK, correct_count, incorrect_count, last_reviewed,
//!              next_review, ease_factor, interval)
//! ```
//! A stats row refers to its word by value. Deleting a word deletes its
//! stats in the same transaction.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;

use super::models::{ReviewStats, SavedWord, WordOrder};

#[derive(Error, Debug)]
pub enum WordStorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WordStorageError>;

pub trait SavedWordStore {
    /// Insert a word, replacing any existing row with the same key
    fn insert_word(&self, word: &SavedWord) -> Result<()>;

    /// Delete a word together with its review stats
    fn delete_word(&self, word: &str) -> Result<()>;

    fn get_word(&self, word: &str) -> Result<Option<SavedWord>>;

    fn list_words(&self, order: WordOrder) -> Result<Vec<SavedWord>>;

    fn word_exists(&self, word: &str) -> Result<bool>;
}

pub trait StatsStore {
    fn get_stats(&self, word: &str) -> Result<Option<ReviewStats>>;

    fn upsert_stats(&self, stats: &ReviewStats) -> Result<()>;

    fn delete_stats(&self, word: &str) -> Result<()>;

    /// Every stats row keyed by word
    fn all_stats(&self) -> Result<HashMap<String, ReviewStats>>;
}

/// SQLite-backed word storage
pub struct WordStorage {
    conn: Connection,
}

impl WordStorage {
    /// Open (or create) the database at `db_path`
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let storage = Self {
            conn: Connection::open(db_path)?,
        };
        storage.init()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self> {
        let storage = Self {
            conn: Connection::open_in_memory()?,
        };
        storage.init()?;
        Ok(storage)
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS saved_words (
                word TEXT PRIMARY KEY,
                simplified TEXT NOT NULL,
                traditional TEXT NOT NULL,
                pinyin TEXT NOT NULL,
                definitions TEXT NOT NULL,
                timestamp REAL NOT NULL
            );

            CREATE TABLE IF NOT EXISTS review_stats (
                word TEXT PRIMARY KEY,
                correct_count INTEGER NOT NULL DEFAULT 0,
                incorrect_count INTEGER NOT NULL DEFAULT 0,
                last_reviewed REAL NOT NULL,
                next_review REAL NOT NULL,
                ease_factor REAL NOT NULL,
                interval REAL NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    pub fn count_words(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM saved_words", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn word_from_row(row: &Row<'_>) -> rusqlite::Result<SavedWord> {
    Ok(SavedWord {
        word: row.get(0)?,
        simplified: row.get(1)?,
        traditional: row.get(2)?,
        pinyin: row.get(3)?,
        definitions: row.get(4)?,
        timestamp: row.get(5)?,
    })
}

fn stats_from_row(row: &Row<'_>) -> rusqlite::Result<ReviewStats> {
    Ok(ReviewStats {
        word: row.get(0)?,
        correct_count: row.get(1)?,
        incorrect_count: row.get(2)?,
        last_reviewed: row.get(3)?,
        next_review: row.get(4)?,
        ease_factor: row.get(5)?,
        interval: row.get(6)?,
    })
}

const WORD_COLUMNS: &str = "word, simplified, traditional, pinyin, definitions, timestamp";
const STATS_COLUMNS: &str =
    "word, correct_count, incorrect_count, last_reviewed, next_review, ease_factor, interval";

impl SavedWordStore for WordStorage {
    fn insert_word(&self, word: &SavedWord) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT OR REPLACE INTO saved_words ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                WORD_COLUMNS
            ),
            params![
                word.word,
                word.simplified,
                word.traditional,
                word.pinyin,
                word.definitions,
                word.timestamp,
            ],
        )?;
        Ok(())
    }

    fn delete_word(&self, word: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM saved_words WHERE word = ?1", params![word])?;
        tx.execute("DELETE FROM review_stats WHERE word = ?1", params![word])?;
        tx.commit()?;
        Ok(())
    }

    fn get_word(&self, word: &str) -> Result<Option<SavedWord>> {
        let found = self
            .conn
            .query_row(
                &format!("SELECT {} FROM saved_words WHERE word = ?1", WORD_COLUMNS),
                params![word],
                word_from_row,
            )
            .optional()?;
        Ok(found)
    }

    fn list_words(&self, order: WordOrder) -> Result<Vec<SavedWord>> {
        let order_by = match order {
            WordOrder::Insertion => "rowid ASC",
            WordOrder::NewestFirst => "timestamp DESC, rowid DESC",
            WordOrder::OldestFirst => "timestamp ASC, rowid ASC",
        };
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM saved_words ORDER BY {}",
            WORD_COLUMNS, order_by
        ))?;
        let words = stmt
            .query_map([], word_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(words)
    }

    fn word_exists(&self, word: &str) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM saved_words WHERE word = ?1)",
            params![word],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

impl StatsStore for WordStorage {
    fn get_stats(&self, word: &str) -> Result<Option<ReviewStats>> {
        let found = self
            .conn
            .query_row(
                &format!("SELECT {} FROM review_stats WHERE word = ?1", STATS_COLUMNS),
                params![word],
                stats_from_row,
            )
            .optional()?;
        Ok(found)
    }

    fn upsert_stats(&self, stats: &ReviewStats) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT OR REPLACE INTO review_stats ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                STATS_COLUMNS
            ),
            params![
                stats.word,
                stats.correct_count,
                stats.incorrect_count,
                stats.last_reviewed,
                stats.next_review,
                stats.ease_factor,
                stats.interval,
            ],
        )?;
        Ok(())
    }

    fn delete_stats(&self, word: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM review_stats WHERE word = ?1", params![word])?;
        Ok(())
    }

    fn all_stats(&self) -> Result<HashMap<String, ReviewStats>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM review_stats", STATS_COLUMNS))?;
        let stats = stmt
            .query_map([], stats_from_row)?
            .map(|row| row.map(|s| (s.word.clone(), s)))
            .collect::<rusqlite::Result<HashMap<_, _>>>()?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn word(text: &str, timestamp: f64) -> SavedWord {
        SavedWord {
            word: text.to_string(),
            simplified: text.to_string(),
            traditional: text.to_string(),
            pinyin: "nǐ hǎo".to_string(),
            definitions: "hello\nhi".to_string(),
            timestamp,
        }
    }

    fn stats(text: &str) -> ReviewStats {
        ReviewStats {
            word: text.to_string(),
            correct_count: 2,
            incorrect_count: 1,
            last_reviewed: 100.0,
            next_review: 200.0,
            ease_factor: 2.3,
            interval: 1.0,
        }
    }

    #[test]
    fn test_insert_and_get_word() {
        let storage = WordStorage::in_memory().unwrap();
        storage.insert_word(&word("你好", 1.5)).unwrap();

        assert!(storage.word_exists("你好").unwrap());
        assert!(!storage.word_exists("再见").unwrap());
        assert_eq!(storage.get_word("你好").unwrap().unwrap(), word("你好", 1.5));
        assert_eq!(storage.count_words().unwrap(), 1);
    }

    #[test]
    fn test_list_orders() {
        let storage = WordStorage::in_memory().unwrap();
        storage.insert_word(&word("b", 20.0)).unwrap();
        storage.insert_word(&word("a", 10.0)).unwrap();
        storage.insert_word(&word("c", 30.0)).unwrap();

        let texts = |order| {
            storage
                .list_words(order)
                .unwrap()
                .into_iter()
                .map(|w| w.word)
                .collect::<Vec<_>>()
        };
        assert_eq!(texts(WordOrder::Insertion), vec!["b", "a", "c"]);
        assert_eq!(texts(WordOrder::NewestFirst), vec!["c", "b", "a"]);
        assert_eq!(texts(WordOrder::OldestFirst), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_delete_word_removes_stats() {
        let storage = WordStorage::in_memory().unwrap();
        storage.insert_word(&word("你好", 1.0)).unwrap();
        storage.upsert_stats(&stats("你好")).unwrap();
        assert!(storage.get_stats("你好").unwrap().is_some());

        storage.delete_word("你好").unwrap();
        assert!(!storage.word_exists("你好").unwrap());
        assert!(storage.get_stats("你好").unwrap().is_none());
    }

    #[test]
    fn test_upsert_stats() {
        let storage = WordStorage::in_memory().unwrap();
        storage.upsert_stats(&stats("你好")).unwrap();

        let mut updated = stats("你好");
        updated.correct_count = 3;
        updated.interval = 2.5;
        storage.upsert_stats(&updated).unwrap();

        assert_eq!(storage.get_stats("你好").unwrap().unwrap(), updated);
        let all = storage.all_stats().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all["你好"], updated);

        storage.delete_stats("你好").unwrap();
        assert!(storage.all_stats().unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_open() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("saved_words.db");
        {
            let storage = WordStorage::open(&path).unwrap();
            storage.insert_word(&word("学生", 5.0)).unwrap();
            storage.upsert_stats(&stats("学生")).unwrap();
        }

        let storage = WordStorage::open(&path).unwrap();
        assert!(storage.word_exists("学生").unwrap());
        assert_eq!(storage.get_stats("学生").unwrap().unwrap(), stats("学生"));
    }
}
