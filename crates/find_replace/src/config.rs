//! Initial option state for new engines.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::options::SearchOptionSet;

/// Option defaults applied when an engine is created.
///
/// Every field is optional in TOML; missing fields keep the defaults below,
/// which match a freshly opened find dialog (forward, whole document, wrap on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FindReplaceConfig {
	/// Search towards the end of the document.
	pub forward: bool,
	/// Search the whole document instead of the selection.
	pub global: bool,
	/// Continue from the opposite boundary when a search runs off the end.
	pub wrap: bool,
	/// Match letter case exactly.
	pub case_sensitive: bool,
	/// Only match whole words.
	pub whole_word: bool,
	/// Treat the query as a regular expression.
	pub regex: bool,
	/// Search while the query is being typed.
	pub incremental: bool,
	/// Restrict replace-all and select-all to the current selection.
	pub replace_all_in_selection: bool,
}

impl Default for FindReplaceConfig {
	fn default() -> Self {
		Self {
			forward: true,
			global: true,
			wrap: true,
			case_sensitive: false,
			whole_word: false,
			regex: false,
			incremental: false,
			replace_all_in_selection: false,
		}
	}
}

impl FindReplaceConfig {
	/// Parses a configuration from TOML source.
	pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(source)?)
	}

	/// Reads and parses a configuration file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let source = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml(&source)
	}

	/// Returns the options this configuration activates.
	pub fn initial_options(&self) -> SearchOptionSet {
		let mut set = SearchOptionSet::empty();
		set.set(SearchOptionSet::FORWARD, self.forward);
		set.set(SearchOptionSet::GLOBAL, self.global);
		set.set(SearchOptionSet::WRAP, self.wrap);
		set.set(SearchOptionSet::CASE_SENSITIVE, self.case_sensitive);
		set.set(SearchOptionSet::WHOLE_WORD, self.whole_word);
		set.set(SearchOptionSet::REGEX, self.regex);
		set.set(SearchOptionSet::INCREMENTAL, self.incremental);
		set.set(SearchOptionSet::REPLACE_ALL_SCOPE, self.replace_all_in_selection);
		set
	}
}
