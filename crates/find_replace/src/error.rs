//! Error types for find/replace operations and configuration loading.
//!
//! Routine outcomes (no match, wrapped, read-only) are not errors; they are
//! reported as [`crate::Status`]. The types here are precondition failures
//! that stop an operation before the target is touched.

use std::path::PathBuf;

use thiserror::Error;

/// Precondition failures of a find/replace operation.
#[derive(Debug, Error)]
pub enum FindReplaceError {
	/// No target has been installed with `update_target`.
	#[error("no find/replace target installed")]
	NoTarget,

	/// The shared target is currently borrowed elsewhere.
	#[error("find/replace target is already borrowed")]
	TargetBusy,

	/// The query is not a valid regular expression.
	#[error("invalid search pattern: {0}")]
	InvalidPattern(#[from] regex::Error),
}

/// Result type for find/replace operations.
pub type Result<T> = std::result::Result<T, FindReplaceError>;

/// Errors that can occur when loading a [`crate::FindReplaceConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}
