//! Shared utilities
//!
//! # Modules
//!
//! - [`fs`] - File system operations with atomic writes
//! - [`progress`] - Progress bars and spinners for registry scans
//!
//! # Example
//!
//! ```rust,no_run
//! use skillgraph::utils::{atomic_write, ensure_dir, ProgressBar};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("out"))?;
//! atomic_write(Path::new("out/skills-manifest.json"), b"{}")?;
//!
//! let progress = ProgressBar::new(100);
//! progress.set_message("Scanning...");
//! # Ok(())
//! # }
//! ```

pub mod fs;
pub mod progress;

pub use fs::{atomic_write, ensure_dir, safe_write};
pub use progress::ProgressBar;
