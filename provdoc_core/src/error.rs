use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ProvdocError {
	#[error("filesystem operation failed for `{path}`")]
	#[diagnostic(code(provdoc::filesystem))]
	Filesystem {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to serialize deployment config: {0}")]
	#[diagnostic(code(provdoc::serialization))]
	Serialization(String),

	#[error("failed to parse setup doc `{file}`: {reason}")]
	#[diagnostic(
		code(provdoc::doc_parse),
		help("setup docs must start with a `---` delimited YAML front matter block containing a `title`")
	)]
	DocParse { file: String, reason: String },

	#[error("setup doc `{file}` references unknown config field `{key}`")]
	#[diagnostic(
		code(provdoc::unknown_config_field),
		help("every key listed in `configFields` must be declared in the provider's config schema")
	)]
	UnknownConfigField { file: String, key: String },

	#[error("template rendering failed: {0}")]
	#[diagnostic(code(provdoc::template_render))]
	TemplateRender(String),

	#[error("no registry manifest found in `{0}`")]
	#[diagnostic(
		code(provdoc::config_not_found),
		help("create a `provdoc.toml` describing the providers to document")
	)]
	ConfigNotFound(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(provdoc::config_parse),
		help("check that provdoc.toml is valid TOML with a list of [[providers]] entries")
	)]
	ConfigParse(String),

	#[error("duplicate provider `{0}` in registry")]
	#[diagnostic(
		code(provdoc::duplicate_provider),
		help("each provider type and version pair must be registered once")
	)]
	DuplicateProvider(String),

	#[error("duplicate config field `{0}`")]
	#[diagnostic(
		code(provdoc::duplicate_field),
		help("config field keys must be unique within a provider")
	)]
	DuplicateField(String),

	#[error("provider `{0}` does not map to a path below the output root")]
	#[diagnostic(
		code(provdoc::invalid_provider_name),
		help("provider types and versions must be relative `/`-separated names without empty, `.` or `..` segments")
	)]
	InvalidProviderName(String),

	#[error("`{0}` is not a path below the output root")]
	#[diagnostic(code(provdoc::output_path))]
	OutputPathEscapesRoot(String),
}

impl ProvdocError {
	/// Wrap an [`std::io::Error`] with the path that caused it.
	pub fn filesystem(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
		Self::Filesystem {
			path: path.as_ref().display().to_string(),
			source,
		}
	}
}

pub type ProvdocResult<T> = Result<T, ProvdocError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
