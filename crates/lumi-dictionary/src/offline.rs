use std::path::Path;
use std::sync::{Arc, Mutex};

use lumi_core::cache::MemoCache;
use lumi_core::dictionary::DictionaryProvider;
use lumi_core::types::DictionaryEntry;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::DictionaryError;

/// Durable dictionary store: one row per lemma, created on first use.
/// Lookups go through the memo cache; the sqlite file survives restarts.
pub struct OfflineDictionary {
    conn: Arc<Mutex<Connection>>,
    cache: MemoCache<DictionaryEntry>,
}

impl OfflineDictionary {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS entries (
                lemma TEXT PRIMARY KEY,
                entry TEXT NOT NULL
            )",
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            cache: MemoCache::new(),
        })
    }

    async fn fetch(&self, lemma: &str) -> Result<Option<DictionaryEntry>, DictionaryError> {
        let conn = Arc::clone(&self.conn);
        let lemma = lemma.to_string();

        let row: Option<String> =
            tokio::task::spawn_blocking(move || -> Result<Option<String>, DictionaryError> {
                let conn = conn.lock().map_err(|_| DictionaryError::Poisoned)?;
                Ok(conn
                    .query_row(
                        "SELECT entry FROM entries WHERE lemma = ?1",
                        [lemma.as_str()],
                        |row| row.get(0),
                    )
                    .optional()?)
            })
            .await??;

        match row {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Bulk-import entries, replacing existing rows per lemma.
    pub async fn import(&self, entries: Vec<DictionaryEntry>) -> Result<usize, DictionaryError> {
        let conn = Arc::clone(&self.conn);

        let count = tokio::task::spawn_blocking(move || -> Result<usize, DictionaryError> {
            let mut conn = conn.lock().map_err(|_| DictionaryError::Poisoned)?;
            let tx = conn.transaction()?;
            let mut imported = 0;
            {
                let mut stmt =
                    tx.prepare("INSERT OR REPLACE INTO entries (lemma, entry) VALUES (?1, ?2)")?;
                for entry in &entries {
                    stmt.execute(params![entry.lemma, serde_json::to_string(entry)?])?;
                    imported += 1;
                }
            }
            tx.commit()?;
            Ok(imported)
        })
        .await??;

        // Imports may replace rows the memo cache has already answered for.
        self.cache.clear().await;

        Ok(count)
    }

    pub async fn clear(&self) -> Result<(), DictionaryError> {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || -> Result<(), DictionaryError> {
            let conn = conn.lock().map_err(|_| DictionaryError::Poisoned)?;
            conn.execute("DELETE FROM entries", [])?;
            Ok(())
        })
        .await??;

        self.cache.clear().await;
        Ok(())
    }

    pub async fn entry_count(&self) -> Result<usize, DictionaryError> {
        let conn = Arc::clone(&self.conn);
        let count: i64 =
            tokio::task::spawn_blocking(move || -> Result<i64, DictionaryError> {
                let conn = conn.lock().map_err(|_| DictionaryError::Poisoned)?;
                Ok(conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?)
            })
            .await??;
        Ok(count as usize)
    }
}

#[async_trait::async_trait]
impl DictionaryProvider for OfflineDictionary {
    fn name(&self) -> &str {
        "offline"
    }

    fn is_offline(&self) -> bool {
        true
    }

    async fn lookup(&self, word: &str) -> Option<DictionaryEntry> {
        let lemma = word.trim().to_lowercase();
        match self.cache.get_or_fetch(&lemma, || self.fetch(&lemma)).await {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("offline dictionary lookup for {lemma:?} failed: {e}");
                None
            }
        }
    }
}
