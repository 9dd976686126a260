//! Find/replace logic engine.
//!
//! The engine searches and replaces text in an abstract [`FindReplaceTarget`]
//! under a set of [`SearchOption`]s and reports exceptional outcomes as a
//! [`Status`]. A successful operation reports no status at all, so callers
//! match on `Option<Status>` rather than on a success variant.
//!
//! Presentation is left to the caller: the engine never renders, and the
//! derived enablement in [`SearchOptions::can_enable`] is what a UI should
//! mirror for its option toggles.

/// Initial option state loaded from TOML.
pub mod config;
/// Error types.
pub mod error;
/// Incremental search anchor tracking.
pub mod incremental;
/// The find/replace engine.
pub mod logic;
/// Search options and their constraints.
pub mod options;
/// Query compilation and matching.
pub mod pattern;
/// Operation outcome model.
pub mod status;
/// Text target capability and an in-memory implementation.
pub mod target;

pub use config::FindReplaceConfig;
pub use error::{ConfigError, FindReplaceError, Result};
pub use finch_primitives::{CharIdx, CharLen, TextRange};
pub use incremental::IncrementalSearch;
pub use logic::FindReplaceLogic;
pub use options::{SearchOption, SearchOptionSet, SearchOptions};
pub use pattern::{Haystack, Pattern, PatternFlags};
pub use status::{Status, StatusVisitor};
pub use target::{EditRejected, FindReplaceTarget, RopeTarget, SharedTarget};
