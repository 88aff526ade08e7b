//! redb-based durable store for the cart
//!
//! The browser original kept the cart in localStorage; here the same
//! contract is backed by redb: one `carts` table, key = table number,
//! value = JSON-serialized line list. Every save commits before
//! returning, so a crash between a cart mutation and the next read
//! never loses data already acknowledged to the caller.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::CartLine;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for cart line lists: key = table number, value = JSON `Vec<CartLine>`
const CARTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("carts");

/// Cart store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable cart store backed by redb
#[derive(Clone)]
pub struct CartStore {
    db: Arc<Database>,
}

impl CartStore {
    /// Open or create the store at the given path
    ///
    /// redb commits are persistent as soon as `commit()` returns
    /// (copy-on-write with atomic pointer swap), so a reload after a
    /// crash reconstructs exactly the last saved line list.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CARTS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory store (tests and demos)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CARTS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Persist the full line list for a table
    pub fn save_lines(&self, table_number: &str, lines: &[CartLine]) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CARTS_TABLE)?;
            let value = serde_json::to_vec(lines)?;
            table.insert(table_number, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Load the line list for a table; an unknown table is an empty cart
    pub fn load_lines(&self, table_number: &str) -> StoreResult<Vec<CartLine>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CARTS_TABLE)?;

        match table.get(table_number)? {
            Some(value) => {
                let lines: Vec<CartLine> = serde_json::from_slice(value.value())?;
                Ok(lines)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Remove the stored line list for a table
    pub fn clear_lines(&self, table_number: &str) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CARTS_TABLE)?;
            table.remove(table_number)?;
        }
        txn.commit()?;
        Ok(())
    }
}
