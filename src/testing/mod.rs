//! Testing utilities
//!
//! Lets debates and experiment suites run end to end without an LLM endpoint.

pub mod mocks;

pub use mocks::*;
