use std::path::Path;
use std::path::PathBuf;

use crate::EligibleProvider;
use crate::InstructionDocument;
use crate::OutputDir;
use crate::ProvdocResult;
use crate::ProviderRegistry;
use crate::REGISTRY_CATEGORY;
use crate::REGISTRY_CATEGORY_FILE;
use crate::REGISTRY_INDEX_FILE;
use crate::RegistryEntry;
use crate::TemplateData;
use crate::eligible_providers;
use crate::parse_setup_docs;
use crate::render_deployment_config;
use crate::render_instructions;
use crate::render_registry;

/// Result of a generation run.
#[derive(Debug)]
pub struct GenerateResult {
	/// Index entries in the order their pages were written.
	pub entries: Vec<RegistryEntry>,
	/// Provider pages written, one per entry and in the same order.
	pub provider_files: Vec<PathBuf>,
	/// Path of the registry index page.
	pub index_file: PathBuf,
	/// Path of the category metadata document.
	pub category_file: PathBuf,
}

/// Generate documentation for every eligible provider in `registry` below
/// `root`, using the placeholder [`TemplateData`].
pub fn generate(
	registry: &ProviderRegistry,
	root: impl Into<PathBuf>,
) -> ProvdocResult<GenerateResult> {
	generate_with_data(registry, root, &TemplateData::default())
}

/// Generate documentation, substituting `data` into setup docs.
///
/// The output root is deleted and recreated first. Any error aborts the run
/// immediately; files written before the failure are left in place.
pub fn generate_with_data(
	registry: &ProviderRegistry,
	root: impl Into<PathBuf>,
	data: &TemplateData,
) -> ProvdocResult<GenerateResult> {
	let output = OutputDir::recreate(root)?;
	let mut entries = Vec::new();
	let mut provider_files = Vec::new();

	for provider in eligible_providers(registry) {
		let page = render_provider_page(&provider, data)?;
		let relative = Path::new(provider.provider_type).join(format!("{}.md", provider.version));
		provider_files.push(output.write(relative, &page)?);
		entries.push(RegistryEntry::new(provider.provider_type, provider.version));
	}

	let index = render_registry(&entries)?;
	let index_file = output.write(REGISTRY_INDEX_FILE, &index)?;
	let category_file = output.write(REGISTRY_CATEGORY_FILE, REGISTRY_CATEGORY)?;

	tracing::info!(
		providers = entries.len(),
		root = %output.root().display(),
		"generated provider registry docs"
	);

	Ok(GenerateResult {
		entries,
		provider_files,
		index_file,
		category_file,
	})
}

/// Render the markdown page for one provider version without touching the
/// filesystem.
#[tracing::instrument(level = "debug", skip_all, fields(provider = %provider.uses()))]
pub fn render_provider_page(
	provider: &EligibleProvider<'_>,
	data: &TemplateData,
) -> ProvdocResult<String> {
	let config = provider.config_schema.config();
	let steps = parse_setup_docs(&provider.setup_docs.setup_docs(), &config, data)?;
	let deployment_config =
		render_deployment_config(&config, provider.registered.default_id(), &provider.uses())?;
	let document = InstructionDocument::new(
		provider.provider_type,
		provider.version,
		deployment_config,
		&steps,
	);

	render_instructions(&document)
}
