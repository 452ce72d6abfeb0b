use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::Config;
use crate::ConfigSchemaProvider;
use crate::Field;
use crate::ProvdocError;
use crate::ProvdocResult;
use crate::Provider;
use crate::ProviderRegistry;
use crate::RegisteredProvider;
use crate::SetupDocProvider;
use crate::SetupDocs;

/// Supported manifest locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["provdoc.toml", ".provdoc.toml", ".config/provdoc.toml"];

/// Registry manifest loaded from a `provdoc.toml` file.
///
/// ```toml
/// [[providers]]
/// type = "aws-sso"
/// version = "v2"
/// default_id = "aws-sso-v2"
/// setup_docs = "providers/aws-sso/setup"
///
/// [[providers.config]]
/// key = "region"
/// description = "The region the AWS SSO instance is deployed to"
///
/// [[providers.config]]
/// key = "apiToken"
/// description = "API token used to manage users"
/// secret = true
/// secret_path = "awsssm:///granted/providers/aws-sso/apiToken"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ProvdocConfig {
	/// Providers to register, in any order.
	#[serde(default)]
	pub providers: Vec<ProviderManifest>,
}

/// A single `[[providers]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderManifest {
	#[serde(rename = "type")]
	pub provider_type: String,
	pub version: String,
	/// Identifier used in example deployment configs. Defaults to
	/// `<type>-<version>`.
	#[serde(default)]
	pub default_id: Option<String>,
	/// Directory of setup doc files, relative to the project root. A provider
	/// without one has no setup documentation.
	#[serde(default)]
	pub setup_docs: Option<PathBuf>,
	/// Configuration schema. A provider without one has no config schema.
	#[serde(default)]
	pub config: Option<Vec<FieldManifest>>,
}

/// A single `[[providers.config]]` field.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldManifest {
	pub key: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub default: Option<String>,
	#[serde(default)]
	pub secret: bool,
	#[serde(default)]
	pub secret_path: Option<String>,
}

impl From<&FieldManifest> for Field {
	fn from(manifest: &FieldManifest) -> Self {
		let mut field = Field::new(&manifest.key, &manifest.description);
		if let Some(value) = &manifest.default {
			field = field.with_value(value);
		}
		if manifest.secret {
			field = field.secret();
		}
		if let Some(path) = &manifest.secret_path {
			field = field.with_secret_path(path);
		}
		field
	}
}

impl ProviderManifest {
	pub fn default_id(&self) -> String {
		self.default_id.clone().unwrap_or_else(|| {
			format!("{}-{}", self.provider_type.replace('/', "-"), self.version)
		})
	}
}

impl ProvdocConfig {
	/// Resolve the manifest path at `root` using [`CONFIG_FILE_CANDIDATES`].
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the manifest from the first discovered file at `root`.
	/// Returns `None` if no manifest exists.
	pub fn load(root: &Path) -> ProvdocResult<Option<ProvdocConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)
			.map_err(|e| ProvdocError::filesystem(&config_path, e))?;

		Self::parse(&content).map(Some)
	}

	pub fn parse(content: &str) -> ProvdocResult<ProvdocConfig> {
		toml::from_str(content).map_err(|e| ProvdocError::ConfigParse(e.to_string()))
	}

	/// Build a [`ProviderRegistry`], reading setup docs relative to `root`.
	pub fn into_registry(self, root: &Path) -> ProvdocResult<ProviderRegistry> {
		let mut registry = ProviderRegistry::new();

		for manifest in self.providers {
			let default_id = manifest.default_id();
			let config = manifest
				.config
				.as_ref()
				.map(|fields| Config::new(fields.iter().map(Field::from).collect()))
				.transpose()?;
			let setup_docs = manifest
				.setup_docs
				.as_ref()
				.map(|dir| SetupDocs::from_dir(root.join(dir)))
				.transpose()?;

			registry.register(
				manifest.provider_type,
				manifest.version,
				RegisteredProvider::new(ManifestProvider { config, setup_docs }, default_id),
			)?;
		}

		Ok(registry)
	}
}

/// A provider described entirely by manifest data.
#[derive(Debug, Clone, Default)]
pub struct ManifestProvider {
	pub config: Option<Config>,
	pub setup_docs: Option<SetupDocs>,
}

impl Provider for ManifestProvider {
	fn as_config_schema(&self) -> Option<&dyn ConfigSchemaProvider> {
		self.config.is_some().then_some(self as &dyn ConfigSchemaProvider)
	}

	fn as_setup_docs(&self) -> Option<&dyn SetupDocProvider> {
		self.setup_docs.is_some().then_some(self as &dyn SetupDocProvider)
	}
}

impl ConfigSchemaProvider for ManifestProvider {
	fn config(&self) -> Config {
		self.config.clone().unwrap_or_default()
	}
}

impl SetupDocProvider for ManifestProvider {
	fn setup_docs(&self) -> SetupDocs {
		self.setup_docs.clone().unwrap_or_default()
	}
}

/// Load the manifest at `root` and build its registry. Fails when no
/// manifest exists.
pub fn load_registry(root: &Path) -> ProvdocResult<ProviderRegistry> {
	let Some(config) = ProvdocConfig::load(root)? else {
		return Err(ProvdocError::ConfigNotFound(root.display().to_string()));
	};

	config.into_registry(root)
}
