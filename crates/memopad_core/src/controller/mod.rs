//! Core use-case controllers.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level list/selection APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod list_controller;
