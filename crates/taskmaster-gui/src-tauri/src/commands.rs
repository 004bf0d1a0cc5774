//! Tauri command handlers. Register them
//! by full module path; re-exports hide
//! the items `generate_handler!` needs.

pub mod auth;
pub mod common;
pub mod config;
pub mod tasks;
