//! Core domain logic for Memopad.
//! This crate is the single source of truth for business invariants.

pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod store;

pub use controller::list_controller::{ControllerError, MemoListController};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::memo::{epoch_ms_now, Memo, MemoId, MemoValidationError};
pub use store::memo_store::{MemoStore, SqliteMemoStore, StoreError, StoreResult, STORAGE_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
