//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Manual mocks keep the repository semantics (name uniqueness, the vote
//! rule, rating updates) visible in one place, and `AppState` is generic so
//! the same mocks back the HTTP tests.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
