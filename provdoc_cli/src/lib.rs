use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate markdown documentation for the provider registry.",
	long_about = "provdoc walks the provider registry described by `provdoc.toml` and writes one \
	              markdown page per provider version, plus an index page and category metadata, \
	              to `docs/approvals/providers/registry/`.\n\nThe output directory is deleted and \
	              recreated on every run."
)]
pub struct ProvdocCli {
	#[command(subcommand)]
	pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Generate the provider registry documentation.
	///
	/// Only providers that expose both a configuration schema and setup docs
	/// are documented. Any error aborts the run and may leave the output
	/// directory partially written; re-running replaces it entirely.
	Generate,
}
