use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "finch")]
#[command(about = "Find and replace text in a file")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// TOML file with the initial search options
	#[arg(long, short = 'c', value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// List every match of a query
	Find {
		/// File to search
		file: PathBuf,
		/// Text or pattern to look for
		query: String,
		/// Search from the end of the file towards the start
		#[arg(long, short = 'b')]
		backward: bool,
		/// Option overrides.
		#[command(flatten)]
		search: SearchArgs,
	},
	/// Replace every match of a query
	Replace {
		/// File to edit
		file: PathBuf,
		/// Text or pattern to look for
		query: String,
		/// Replacement text; `$1` and `${name}` expand in regex mode
		replacement: String,
		/// Write the result back instead of printing it
		#[arg(long, short = 'w')]
		write: bool,
		/// Option overrides.
		#[command(flatten)]
		search: SearchArgs,
	},
}

/// Flags that switch search options on, over whatever the config says.
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct SearchArgs {
	/// Treat the query as a regular expression
	#[arg(long, short = 'e')]
	pub regex: bool,

	/// Match case exactly
	#[arg(long, short = 's')]
	pub case_sensitive: bool,

	/// Only match whole words
	#[arg(long, short = 'W')]
	pub whole_word: bool,
}
