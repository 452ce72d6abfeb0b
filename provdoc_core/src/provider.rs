use std::collections::BTreeMap;
use std::fmt;
use std::path::Component;
use std::path::Path;

use crate::Config;
use crate::ProvdocError;
use crate::ProvdocResult;
use crate::SetupDocs;

/// A pluggable access provider.
///
/// Capabilities are opt-in: a provider advertises a configuration schema or
/// setup documentation by overriding the matching accessor. Only providers
/// exposing both are documented.
pub trait Provider {
	/// Returns the configuration-schema capability, if implemented.
	fn as_config_schema(&self) -> Option<&dyn ConfigSchemaProvider> {
		None
	}

	/// Returns the setup-documentation capability, if implemented.
	fn as_setup_docs(&self) -> Option<&dyn SetupDocProvider> {
		None
	}
}

/// A provider that exposes the configuration fields it accepts.
pub trait ConfigSchemaProvider {
	fn config(&self) -> Config;
}

/// A provider that ships human-authored setup instructions.
pub trait SetupDocProvider {
	fn setup_docs(&self) -> SetupDocs;
}

/// A provider implementation together with its registry metadata.
pub struct RegisteredProvider {
	provider: Box<dyn Provider>,
	default_id: String,
}

impl RegisteredProvider {
	pub fn new(provider: impl Provider + 'static, default_id: impl Into<String>) -> Self {
		Self {
			provider: Box::new(provider),
			default_id: default_id.into(),
		}
	}

	pub fn provider(&self) -> &dyn Provider {
		self.provider.as_ref()
	}

	/// Identifier used when naming this provider in generated examples.
	pub fn default_id(&self) -> &str {
		&self.default_id
	}
}

impl fmt::Debug for RegisteredProvider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RegisteredProvider")
			.field("default_id", &self.default_id)
			.field("config_schema", &self.provider.as_config_schema().is_some())
			.field("setup_docs", &self.provider.as_setup_docs().is_some())
			.finish()
	}
}

/// Registered providers keyed by type, then version.
///
/// Both levels are ordered maps so that walking the registry always visits
/// providers sorted by type and then version.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
	providers: BTreeMap<String, BTreeMap<String, RegisteredProvider>>,
}

impl ProviderRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a provider under `provider_type` and `version`.
	///
	/// Both become path segments of the generated page, so each must be a
	/// relative `/`-separated name with no empty, `.` or `..` segments.
	pub fn register(
		&mut self,
		provider_type: impl Into<String>,
		version: impl Into<String>,
		provider: RegisteredProvider,
	) -> ProvdocResult<()> {
		let provider_type = provider_type.into();
		let version = version.into();

		if !is_output_name(&provider_type) || !is_output_name(&version) {
			return Err(ProvdocError::InvalidProviderName(uses(&provider_type, &version)));
		}

		let versions = self.providers.entry(provider_type.clone()).or_default();

		if versions.contains_key(&version) {
			return Err(ProvdocError::DuplicateProvider(uses(&provider_type, &version)));
		}

		versions.insert(version, provider);
		Ok(())
	}

	pub fn get(&self, provider_type: &str, version: &str) -> Option<&RegisteredProvider> {
		self.providers.get(provider_type)?.get(version)
	}

	/// Iterate every registered provider as `(type, version, provider)`.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &RegisteredProvider)> {
		self.providers.iter().flat_map(|(provider_type, versions)| {
			versions.iter().map(move |(version, provider)| {
				(provider_type.as_str(), version.as_str(), provider)
			})
		})
	}

	pub fn len(&self) -> usize {
		self.providers.values().map(BTreeMap::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// A registered provider that exposes both a configuration schema and setup
/// documentation.
#[derive(Clone, Copy)]
pub struct EligibleProvider<'a> {
	pub provider_type: &'a str,
	pub version: &'a str,
	pub registered: &'a RegisteredProvider,
	pub config_schema: &'a dyn ConfigSchemaProvider,
	pub setup_docs: &'a dyn SetupDocProvider,
}

impl EligibleProvider<'_> {
	/// The `type@version` reference used by deployment configs and the index.
	pub fn uses(&self) -> String {
		uses(self.provider_type, self.version)
	}
}

impl fmt::Debug for EligibleProvider<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EligibleProvider")
			.field("provider_type", &self.provider_type)
			.field("version", &self.version)
			.field("default_id", &self.registered.default_id())
			.finish_non_exhaustive()
	}
}

/// Lazily walk `registry`, yielding only providers that implement both
/// [`ConfigSchemaProvider`] and [`SetupDocProvider`]. Other providers are
/// skipped silently.
pub fn eligible_providers(
	registry: &ProviderRegistry,
) -> impl Iterator<Item = EligibleProvider<'_>> {
	registry.iter().filter_map(|(provider_type, version, registered)| {
		let provider = registered.provider();
		let (Some(config_schema), Some(setup_docs)) =
			(provider.as_config_schema(), provider.as_setup_docs())
		else {
			tracing::debug!(provider_type, version, "skipping undocumented provider");
			return None;
		};

		Some(EligibleProvider {
			provider_type,
			version,
			registered,
			config_schema,
			setup_docs,
		})
	})
}

pub(crate) fn uses(provider_type: &str, version: &str) -> String {
	format!("{provider_type}@{version}")
}

fn is_output_name(value: &str) -> bool {
	!value.is_empty()
		&& value.split('/').all(|segment| !matches!(segment, "" | "." | ".."))
		&& Path::new(value)
			.components()
			.all(|component| matches!(component, Component::Normal(_)))
}
