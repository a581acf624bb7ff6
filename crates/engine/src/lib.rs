//! Echoledger Engine library.
//!
//! Persistence and access layer for NPCs, settlements and their devotion
//! ledgers.
//!
//! ## Structure
//!
//! - `use_cases/` - Access operations over NPCs and settlements
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end scenarios against an in-memory SQLite store.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
