//! Memo list/selection/edit state machine.
//!
//! # Responsibility
//! - Own the in-memory collection, the selected index and the edit flag.
//! - Synchronize every collection mutation with the store.
//!
//! # Invariants
//! - The collection is never empty once a controller exists.
//! - `selected_index` is always in bounds between operations.
//! - Every operation either fully applies its effect and persists, or
//!   leaves state untouched; a failed save never corrupts memory state.
//! - Selection changes are transient and never persisted.

use crate::model::memo::{epoch_ms_now, Memo, MemoId};
use crate::store::memo_store::{MemoStore, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Use-case error for memo list operations.
#[derive(Debug)]
pub enum ControllerError {
    /// Deleting the sole remaining memo was refused. Expected, recoverable
    /// user error; the presentation layer surfaces it as a warning.
    LastMemo,
    /// No memo carries the requested id. Indicates a caller bug, since ids
    /// are only ever offered from the current list.
    NotFound(MemoId),
    /// The store rejected a write; in-memory state was already rolled back.
    Store(StoreError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastMemo => write!(f, "cannot delete the last remaining memo"),
            Self::NotFound(id) => write!(f, "memo not found: {id}"),
            Self::Store(err) => write!(f, "changes not saved: {err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::LastMemo | Self::NotFound(_) => None,
        }
    }
}

impl From<StoreError> for ControllerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Owned list/selection/edit state over a memo store.
///
/// One instance owns its entire state; there are no process-wide globals,
/// so independent instances (and tests) never interfere.
pub struct MemoListController<S: MemoStore> {
    store: S,
    memos: Vec<Memo>,
    selected_index: usize,
    edit_mode: bool,
}

impl<S: MemoStore> MemoListController<S> {
    /// Loads the collection and establishes the never-empty invariant.
    ///
    /// # Contract
    /// - Empty (or absent/degraded) storage is seeded with one memo titled
    ///   `New memo 1` and the seed is persisted immediately.
    /// - Non-empty storage is loaded unchanged and nothing is written.
    /// - Starts with the first memo selected and edit mode off.
    pub fn initialize(store: S) -> Result<Self, ControllerError> {
        let mut memos = store.load()?;
        if memos.is_empty() {
            memos.push(Memo::placeholder(1, epoch_ms_now()));
            store.save(&memos)?;
        }

        Ok(Self {
            store,
            memos,
            selected_index: 0,
            edit_mode: false,
        })
    }

    /// Appends a new placeholder memo, selects it and enters edit mode.
    ///
    /// # Contract
    /// - The title ordinal is `len + 1` at append time. Ordinals are not
    ///   renumbered after deletions; duplicated display numbers are
    ///   accepted behavior.
    /// - Persists the full collection before the new memo becomes visible
    ///   in controller state.
    pub fn add_memo(&mut self) -> Result<&Memo, ControllerError> {
        let mut next = self.memos.clone();
        next.push(Memo::placeholder(next.len() + 1, epoch_ms_now()));
        self.store.save(&next)?;

        self.memos = next;
        self.selected_index = self.memos.len() - 1;
        self.edit_mode = true;
        Ok(&self.memos[self.selected_index])
    }

    /// Selects a memo by id, leaving edit mode.
    ///
    /// Selection is transient UI state and is never persisted. An unknown
    /// id returns `NotFound` and leaves state unchanged.
    pub fn select_memo(&mut self, id: &str) -> Result<&Memo, ControllerError> {
        let position = self
            .memos
            .iter()
            .position(|memo| memo.id == id)
            .ok_or_else(|| ControllerError::NotFound(id.to_string()))?;

        self.selected_index = position;
        self.edit_mode = false;
        Ok(&self.memos[self.selected_index])
    }

    /// Enters edit mode for the currently selected memo.
    ///
    /// No collection change, no persistence.
    pub fn begin_edit(&mut self) {
        self.edit_mode = true;
    }

    /// Applies new title/body to the selected memo and persists.
    ///
    /// # Contract
    /// - Only the selected memo changes; `updated_at` moves to now.
    /// - Leaves edit mode on success.
    pub fn save_edit(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<&Memo, ControllerError> {
        let mut next = self.memos.clone();
        next[self.selected_index].apply_edit(title, body, epoch_ms_now());
        self.store.save(&next)?;

        self.memos = next;
        self.edit_mode = false;
        Ok(&self.memos[self.selected_index])
    }

    /// Removes the selected memo and persists the shorter collection.
    ///
    /// # Contract
    /// - Refused with `LastMemo` when exactly one memo remains; no state
    ///   change and no persistence call in that case.
    /// - When the removed index was the last one, selection re-clamps to
    ///   the new last index; otherwise the numeric index is kept and now
    ///   points at the neighbor that shifted into the slot.
    /// - Leaves edit mode.
    pub fn delete_selected(&mut self) -> Result<(), ControllerError> {
        if self.memos.len() == 1 {
            return Err(ControllerError::LastMemo);
        }

        let mut next = self.memos.clone();
        next.remove(self.selected_index);
        self.store.save(&next)?;

        self.memos = next;
        if self.selected_index >= self.memos.len() {
            self.selected_index = self.memos.len() - 1;
        }
        self.edit_mode = false;
        Ok(())
    }

    /// The ordered collection, insertion order = display order.
    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    /// Index of the currently selected memo. Always in bounds.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// The currently selected memo.
    pub fn selected(&self) -> &Memo {
        &self.memos[self.selected_index]
    }

    /// Whether title/body fields are currently editable.
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }
}
