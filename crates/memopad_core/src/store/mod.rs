//! Store layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable load/save contract for the memo collection.
//! - Isolate SQLite and serialization details from controller logic.
//!
//! # Invariants
//! - Store writes must enforce `Memo::validate()` before persistence.
//! - An absent slot is a normal state, never an error.
//! - A malformed slot value degrades to an empty collection instead of
//!   failing the read.

pub mod memo_store;
