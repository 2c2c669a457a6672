//! Domain model for the memo collection.
//!
//! # Responsibility
//! - Define the canonical memo record shared by store and controller.
//! - Keep creation defaults and validation rules in one place.
//!
//! # Invariants
//! - `id` is stable and never reused for another memo.
//! - `updated_at` never precedes `created_at`.

pub mod memo;
