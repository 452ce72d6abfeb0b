use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use provdoc_cli::Commands;
use provdoc_cli::ProvdocCli;
use provdoc_core::DEFAULT_OUTPUT_ROOT;
use provdoc_core::ProvdocError;
use provdoc_core::ProvdocResult;
use provdoc_core::generate;
use provdoc_core::load_registry;
use tracing_subscriber::EnvFilter;

fn main() {
	let args = ProvdocCli::parse();
	let use_color = std::env::var_os("NO_COLOR").is_none();

	init_tracing(use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match args.command {
		Some(Commands::Generate) => run_generate(use_color),
		None => {
			eprintln!("No subcommand specified. Run `provdoc --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		let report: miette::Report = e.into();
		eprintln!("{report:?}");
		process::exit(2);
	}
}

/// Log to stderr, filtered by `RUST_LOG` and defaulting to warnings only.
fn init_tracing(use_color: bool) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.without_time()
		.try_init()
		.ok();
}

fn run_generate(use_color: bool) -> ProvdocResult<()> {
	let root = std::env::current_dir().map_err(|e| ProvdocError::filesystem(".", e))?;
	let registry = load_registry(&root)?;

	tracing::debug!(providers = registry.len(), "loaded provider registry");

	let result = generate(&registry, root.join(DEFAULT_OUTPUT_ROOT))?;
	let label = if use_color {
		format!("{}", "Generated".green())
	} else {
		"Generated".to_string()
	};

	println!(
		"{label} {} provider page(s) in {DEFAULT_OUTPUT_ROOT}",
		result.entries.len()
	);

	Ok(())
}
