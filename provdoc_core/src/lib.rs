//! `provdoc_core` generates static markdown documentation for a registry of
//! pluggable access providers. Each provider that exposes both a
//! configuration schema and setup documentation gets one page per version,
//! and every page is linked from a single index page.
//!
//! ## Pipeline
//!
//! ```text
//! ProviderRegistry
//!   → eligible_providers (keeps providers with a config schema and setup docs)
//!   → parse_setup_docs (front matter + body → ordered Steps)
//!   → render_deployment_config (safe dump → fenced YAML block)
//!   → render_instructions / render_registry (minijinja templates)
//!   → OutputDir (recreated root, one file per provider version)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use provdoc_core::DEFAULT_OUTPUT_ROOT;
//! use provdoc_core::generate;
//! use provdoc_core::load_registry;
//! use std::path::Path;
//!
//! let registry = load_registry(Path::new(".")).unwrap();
//! let result = generate(&registry, DEFAULT_OUTPUT_ROOT).unwrap();
//! println!("documented {} provider(s)", result.entries.len());
//! ```

pub use config::*;
pub use error::*;
pub use generate::*;
pub use output::*;
pub use provider::*;
pub use render::*;
pub use schema::*;
pub use setup::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod generate;
mod output;
mod provider;
mod render;
mod schema;
mod setup;

#[cfg(test)]
mod __fixtures;
