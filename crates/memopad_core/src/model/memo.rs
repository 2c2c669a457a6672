//! Memo domain model.
//!
//! # Responsibility
//! - Define the single persisted record shape (id, title, body, timestamps).
//! - Provide creation helpers with placeholder-title defaults.
//!
//! # Invariants
//! - `id` is assigned at creation and immutable thereafter.
//! - `created_at` is set once; `updated_at` moves forward on every edit.
//! - Wire field names are `createdAt`/`updatedAt` (stored data predates this
//!   implementation and must keep deserializing).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable string identifier for a memo.
///
/// Kept as a type alias to make semantic intent explicit in signatures. The
/// id contract is "opaque unique string"; the current generator is uuid v4.
pub type MemoId = String;

/// Validation failure for a memo record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoValidationError {
    /// `id` is the empty string.
    EmptyId,
    /// `updated_at` precedes `created_at`.
    ClockSkew { created_at: i64, updated_at: i64 },
}

impl Display for MemoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "memo id must not be empty"),
            Self::ClockSkew {
                created_at,
                updated_at,
            } => write!(
                f,
                "updatedAt ({updated_at}) must be >= createdAt ({created_at})"
            ),
        }
    }
}

impl Error for MemoValidationError {}

/// A single note record.
///
/// The collection order is insertion order; the record itself carries no
/// position. Timestamps are Unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    /// Stable unique id, assigned at creation.
    pub id: MemoId,
    /// User-editable title. Starts as a generated placeholder.
    pub title: String,
    /// User-editable body. Empty at creation.
    pub body: String,
    /// Creation time in epoch milliseconds. Set once.
    pub created_at: i64,
    /// Last save time in epoch milliseconds. Set at creation and on save.
    pub updated_at: i64,
}

impl Memo {
    /// Creates a memo with a freshly generated id and empty body.
    pub fn new(title: impl Into<String>, now_ms: i64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, now_ms)
    }

    /// Creates a memo with a caller-provided id.
    ///
    /// Used by tests and import paths where identity already exists. The
    /// provided `id` must remain stable for this memo's lifetime.
    pub fn with_id(id: MemoId, title: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id,
            title: title.into(),
            body: String::new(),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Creates a memo with the generated placeholder title for the given
    /// 1-based display ordinal.
    ///
    /// The ordinal is derived from collection length at append time, not
    /// from a monotonic counter; it is never renumbered after deletions, so
    /// two memos can legitimately share a display number.
    pub fn placeholder(ordinal: usize, now_ms: i64) -> Self {
        Self::new(format!("New memo {ordinal}"), now_ms)
    }

    /// Replaces title and body, moving `updated_at` forward.
    pub fn apply_edit(&mut self, title: impl Into<String>, body: impl Into<String>, now_ms: i64) {
        self.title = title.into();
        self.body = body.into();
        self.updated_at = now_ms;
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), MemoValidationError> {
        if self.id.is_empty() {
            return Err(MemoValidationError::EmptyId);
        }
        if self.updated_at < self.created_at {
            return Err(MemoValidationError::ClockSkew {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// A clock before the Unix epoch collapses to 0 instead of failing; every
/// timestamp consumer treats the value as opaque ordering metadata.
pub fn epoch_ms_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
