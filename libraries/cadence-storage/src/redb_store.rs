//! File-backed store on top of redb
//!
//! A single `player_state` table maps surface keys to JSON documents. Every
//! write is its own committed transaction, so a crash never leaves a
//! half-written surface behind.

use crate::error::Result;
use crate::kv::KeyValueStore;
use redb::{Database, TableDefinition, TableError};
use std::path::{Path, PathBuf};
use tracing::debug;

const PLAYER_STATE: TableDefinition<&str, &str> = TableDefinition::new("player_state");

/// Durable key/value store in a single redb file
pub struct RedbStore {
    db: Database,
    path: PathBuf,
}

impl RedbStore {
    /// Open (or create) the database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let db = Database::create(&path)?;

        // Create the table up front so readers never race its creation
        let txn = db.begin_write()?;
        txn.open_table(PLAYER_STATE)?;
        txn.commit()?;

        debug!("Opened player state store at {}", path.display());
        Ok(Self { db, path })
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(PLAYER_STATE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value = table.get(key)?.map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(PLAYER_STATE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(PLAYER_STATE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }
}
