//! Backend E2E integration tests.
//!
//! These tests drive the complete App against a fresh in-memory SQLite
//! database per test, with a stepping clock for deterministic timestamps.
//!
//! ```bash
//! cargo test -p echoledger-engine --lib e2e_tests
//! ```

mod e2e_helpers;
mod relationship_tests;

pub use e2e_helpers::*;
