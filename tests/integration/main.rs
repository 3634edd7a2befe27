//! Integration test suite for skillgraph
//!
//! End-to-end tests that run the compiled binary against temporary skill
//! registries and assert on output, exit codes, and written files.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! Tests are organized by command:
//! - **build**: manifest generation, output targets, configuration handling
//! - **check**: failure policy, strict mode, text and JSON reports
//! - **cli**: help and version output, argument validation

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

// Integration tests
mod build;
mod check;
mod cli;
