//! Memo store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the entire memo collection under one fixed key.
//! - Keep SQL and JSON codec details inside the storage boundary.
//!
//! # Invariants
//! - `save` replaces the whole prior value; there is no partial write.
//! - A `save` observed by a later `load` on the same connection returns the
//!   identical collection field-for-field.
//! - Read paths never fail on malformed persisted data; they degrade to an
//!   empty collection and log the degradation.

use crate::db::DbError;
use crate::model::memo::{Memo, MemoValidationError};
use log::warn;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key addressing the one collection slot.
pub const STORAGE_KEY: &str = "memos";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage error for memo collection persistence.
#[derive(Debug)]
pub enum StoreError {
    /// The underlying medium rejected the operation.
    Db(DbError),
    /// The collection could not be encoded for persistence.
    Serialize(serde_json::Error),
    /// An invalid memo reached a write path.
    Validation(MemoValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode memo collection: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<MemoValidationError> for StoreError {
    fn from(value: MemoValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Durable load/save contract for the full memo collection.
pub trait MemoStore {
    /// Reads the whole collection. An absent slot yields an empty vec.
    fn load(&self) -> StoreResult<Vec<Memo>>;
    /// Writes the whole collection, replacing any prior value.
    fn save(&self, memos: &[Memo]) -> StoreResult<()>;
}

// A borrowed store is a store; the controller can hold `&S` while the
// caller keeps the concrete store.
impl<S: MemoStore + ?Sized> MemoStore for &S {
    fn load(&self) -> StoreResult<Vec<Memo>> {
        (**self).load()
    }

    fn save(&self, memos: &[Memo]) -> StoreResult<()> {
        (**self).save(memos)
    }
}

/// SQLite-backed memo store over the `slots` table.
pub struct SqliteMemoStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemoStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MemoStore for SqliteMemoStore<'_> {
    fn load(&self) -> StoreResult<Vec<Memo>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM slots WHERE key = ?1;")?;
        let mut rows = stmt.query([STORAGE_KEY])?;

        let raw: String = match rows.next()? {
            Some(row) => row.get(0)?,
            None => return Ok(Vec::new()),
        };

        let memos: Vec<Memo> = match serde_json::from_str(&raw) {
            Ok(memos) => memos,
            Err(err) => {
                warn!(
                    "event=store_load module=store status=degraded key={} error_code=malformed_value error={}",
                    STORAGE_KEY, err
                );
                return Ok(Vec::new());
            }
        };

        for memo in &memos {
            if let Err(err) = memo.validate() {
                warn!(
                    "event=store_load module=store status=degraded key={} error_code=invalid_memo error={}",
                    STORAGE_KEY, err
                );
                return Ok(Vec::new());
            }
        }

        Ok(memos)
    }

    fn save(&self, memos: &[Memo]) -> StoreResult<()> {
        for memo in memos {
            memo.validate()?;
        }

        let value = serde_json::to_string(memos)?;
        self.conn.execute(
            "INSERT INTO slots (key, value, written_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                written_at = excluded.written_at;",
            params![STORAGE_KEY, value],
        )?;

        Ok(())
    }
}
