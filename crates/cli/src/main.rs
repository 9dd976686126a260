//! Finch command-line front end.
//!
//! Loads a file into an in-memory target and drives the find/replace engine
//! over it: `find` lists every match, `replace` rewrites all of them.

mod cli;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use finch_find_replace::{
	FindReplaceConfig, FindReplaceLogic, FindReplaceTarget, RopeTarget, SearchOption, Status, TextRange,
};
use tracing::{info, warn};

use crate::cli::{Cli, Command, SearchArgs};

fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if cli.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.with_writer(std::io::stderr)
		.finish();

	tracing::subscriber::set_global_default(subscriber)?;

	let config = match &cli.config {
		Some(path) => FindReplaceConfig::load(path)?,
		None => FindReplaceConfig::default(),
	};
	let mut logic = FindReplaceLogic::with_config(&config);

	match cli.command {
		Command::Find {
			file,
			query,
			backward,
			search,
		} => {
			apply(&mut logic, search);
			if backward {
				logic.set_active(SearchOption::Forward, false);
			}
			find(&mut logic, &file, &query)
		}
		Command::Replace {
			file,
			query,
			replacement,
			write,
			search,
		} => {
			apply(&mut logic, search);
			replace(&mut logic, &file, &query, &replacement, write)
		}
	}
}

/// Layers command-line flags over the configured options.
///
/// A file has no selection to scope a search to, so scoped searching is
/// always off here.
fn apply(logic: &mut FindReplaceLogic, search: SearchArgs) {
	logic.set_active(SearchOption::Global, true);
	logic.set_active(SearchOption::ReplaceAllScope, false);
	logic.set_active(SearchOption::Incremental, false);
	if search.case_sensitive {
		logic.set_active(SearchOption::CaseSensitive, true);
	}
	if search.whole_word {
		logic.set_active(SearchOption::WholeWord, true);
	}
	if search.regex {
		logic.set_active(SearchOption::Regex, true);
	}
}

fn find(logic: &mut FindReplaceLogic, file: &Path, query: &str) -> anyhow::Result<ExitCode> {
	let target = RopeTarget::new(&read(file)?).shared();
	if !logic.is_active(SearchOption::Forward) {
		let end = target.borrow().len_chars();
		target.borrow_mut().set_selection(TextRange::point(end));
	}
	logic.set_active(SearchOption::Wrap, false);
	logic.update_target(target.clone());

	let mut count = 0;
	while logic.find_next(query)?.is_none() {
		let target = target.borrow();
		let range = target.selection();
		let line = target.rope().char_to_line(range.offset);
		let column = range.offset - target.rope().line_to_char(line);
		println!("{}:{}:{}: {}", file.display(), line + 1, column + 1, target.text(range));
		count += 1;
	}

	info!(count, file = %file.display(), "find finished");
	Ok(if count == 0 {
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	})
}

fn replace(
	logic: &mut FindReplaceLogic,
	file: &Path,
	query: &str,
	replacement: &str,
	write: bool,
) -> anyhow::Result<ExitCode> {
	let target = RopeTarget::new(&read(file)?).shared();
	logic.update_target(target.clone());

	let (count, status) = logic.replace_all(query, replacement)?;
	info!(count, file = %file.display(), "replace finished");
	if let Some(status) = status {
		warn!(file = %file.display(), %status, "replace-all incomplete");
	}

	let content = target.borrow().content();
	if !write {
		print!("{content}");
	} else if count > 0 {
		fs::write(file, content).with_context(|| format!("failed to write {}", file.display()))?;
	}

	Ok(if status.is_some_and(Status::is_error) {
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	})
}

fn read(path: &Path) -> anyhow::Result<String> {
	fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
