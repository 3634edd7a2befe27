//! Core types and functionality for skillgraph
//!
//! This module provides the error handling foundation used throughout the
//! crate:
//!
//! - **Strongly-typed errors** ([`SkillgraphError`]) for the failure modes
//!   that abort an invocation
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable
//!   suggestions for CLI users
//! - [`user_friendly_error`] - convert any error to user-friendly format
//!
//! # Design Principles
//!
//! Every operation that can fail returns a [`Result`](anyhow::Result) with
//! meaningful error information. Per-skill diagnostics are manifest data,
//! not errors; see the crate-level docs for the partial-failure contract.

pub mod error;

pub use error::{ErrorContext, SkillgraphError, user_friendly_error};
