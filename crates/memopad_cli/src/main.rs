//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `memopad_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use memopad_core::db::open_db_in_memory;
use memopad_core::{MemoListController, SqliteMemoStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("memopad_core version={}", memopad_core::core_version());

    // One full controller cycle against a throwaway in-memory database.
    let conn = open_db_in_memory()?;
    let store = SqliteMemoStore::new(&conn);
    let mut controller = MemoListController::initialize(store)?;
    controller.add_memo()?;
    controller.save_edit("smoke", "core wired")?;

    for (index, memo) in controller.memos().iter().enumerate() {
        let marker = if index == controller.selected_index() {
            "*"
        } else {
            " "
        };
        println!("{marker} [{index}] {}", memo.title);
    }

    Ok(())
}
