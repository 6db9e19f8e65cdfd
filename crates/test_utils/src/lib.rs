//! Test Utilities Crate
//!
//! Shared test infrastructure for the health portal test suite.
//!
//! # Modules
//!
//! - `fixtures`: Ready-made drafts and registrations, randomised with `fake`
//! - `database`: PostgreSQL test containers with the schema applied
//! - `assertions`: Assertion helpers for port errors
//! - `generators`: Property-based strategies for claim data

pub mod fixtures;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
