use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::Config;
use crate::Field;
use crate::ProvdocError;
use crate::ProvdocResult;
use crate::render::template_environment;

/// Illustrative stand-in for the execution role ARN. Generated docs never
/// contain a real value.
pub const EXECUTION_ROLE_ARN_PLACEHOLDER: &str = "{{ Access Handler Execution Role ARN }}";

/// Provider-authored setup documentation: markdown files keyed by their
/// relative name. Iteration is in lexical name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupDocs {
	docs: BTreeMap<String, String>,
}

impl SetupDocs {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a document, replacing any existing document with the same name.
	#[must_use]
	pub fn with_doc(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
		self.insert(name, content);
		self
	}

	pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
		self.docs.insert(name.into(), content.into());
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.docs
			.iter()
			.map(|(name, content)| (name.as_str(), content.as_str()))
	}

	pub fn len(&self) -> usize {
		self.docs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.docs.is_empty()
	}

	/// Load every markdown file below `dir`. Names are relative to `dir` and
	/// use `/` as the separator. Other files are never read, and symlinked
	/// directories are not followed.
	pub fn from_dir(dir: impl AsRef<Path>) -> ProvdocResult<Self> {
		let dir = dir.as_ref();
		let mut docs = Self::new();
		collect_docs(dir, dir, &mut docs)?;
		Ok(docs)
	}
}

fn collect_docs(root: &Path, dir: &Path, docs: &mut SetupDocs) -> ProvdocResult<()> {
	let entries = std::fs::read_dir(dir).map_err(|e| ProvdocError::filesystem(dir, e))?;

	for entry in entries {
		let entry = entry.map_err(|e| ProvdocError::filesystem(dir, e))?;
		let path = entry.path();
		let file_type = entry
			.file_type()
			.map_err(|e| ProvdocError::filesystem(&path, e))?;

		if file_type.is_dir() {
			collect_docs(root, &path, docs)?;
			continue;
		}

		if !is_markdown(&path) {
			tracing::debug!(path = %path.display(), "skipping non-markdown setup file");
			continue;
		}

		let content =
			std::fs::read_to_string(&path).map_err(|e| ProvdocError::filesystem(&path, e))?;
		let name = path
			.strip_prefix(root)
			.unwrap_or(&path)
			.components()
			.map(|component| component.as_os_str().to_string_lossy())
			.collect::<Vec<_>>()
			.join("/");
		docs.insert(name, content);
	}

	Ok(())
}

fn is_markdown(path: &Path) -> bool {
	path.extension()
		.is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Values substituted into setup docs before they are parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateData {
	pub access_handler_execution_role_arn: String,
}

impl Default for TemplateData {
	fn default() -> Self {
		Self {
			access_handler_execution_role_arn: EXECUTION_ROLE_ARN_PLACEHOLDER.to_string(),
		}
	}
}

/// A single titled setup step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
	pub title: String,
	pub instructions: String,
	/// Config fields collected during this step, in the order the doc lists
	/// them. Every entry is a field of the provider's schema.
	pub config_fields: Vec<Field>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrontMatter {
	title: String,
	#[serde(default)]
	config_fields: Vec<String>,
}

/// Parse setup docs into ordered steps.
///
/// Each `.md` document is rendered against `data`, split into YAML front
/// matter and body, and its `configFields` are resolved against `config`.
/// Documents with any other extension are ignored.
pub fn parse_setup_docs(
	docs: &SetupDocs,
	config: &Config,
	data: &TemplateData,
) -> ProvdocResult<Vec<Step>> {
	docs.iter()
		.filter(|(name, _)| {
			let markdown = is_markdown(Path::new(name));
			if !markdown {
				tracing::debug!(name, "ignoring non-markdown setup doc");
			}
			markdown
		})
		.map(|(name, content)| parse_setup_doc(name, content, config, data))
		.collect()
}

/// Parse a single setup doc into a [`Step`].
pub fn parse_setup_doc(
	name: &str,
	content: &str,
	config: &Config,
	data: &TemplateData,
) -> ProvdocResult<Step> {
	let rendered = render_setup_doc(name, content, data)?;
	let Some((matter, body)) = split_front_matter(&rendered) else {
		return Err(ProvdocError::DocParse {
			file: name.to_string(),
			reason: "missing `---` delimited front matter".to_string(),
		});
	};

	let matter: FrontMatter =
		serde_yaml_ng::from_str(matter).map_err(|e| ProvdocError::DocParse {
			file: name.to_string(),
			reason: e.to_string(),
		})?;

	let config_fields = matter
		.config_fields
		.iter()
		.map(|key| {
			config
				.find_field(key)
				.cloned()
				.ok_or_else(|| ProvdocError::UnknownConfigField {
					file: name.to_string(),
					key: key.clone(),
				})
		})
		.collect::<ProvdocResult<Vec<_>>>()?;

	Ok(Step {
		title: matter.title,
		instructions: body.trim_matches(['\r', '\n']).to_string(),
		config_fields,
	})
}

fn render_setup_doc(name: &str, content: &str, data: &TemplateData) -> ProvdocResult<String> {
	if !has_template_syntax(content) {
		return Ok(content.to_string());
	}

	let to_parse_error = |e: minijinja::Error| {
		ProvdocError::DocParse {
			file: name.to_string(),
			reason: e.to_string(),
		}
	};

	let mut env = template_environment();
	env.add_template(name, content).map_err(to_parse_error)?;

	let template = env.get_template(name).map_err(to_parse_error)?;
	template
		.render(minijinja::Value::from_serialize(data))
		.map_err(to_parse_error)
}

/// Check whether content contains minijinja template syntax.
fn has_template_syntax(content: &str) -> bool {
	content.contains("{{") || content.contains("{%") || content.contains("{#")
}

/// Split `content` into its front matter and the body that follows the
/// closing delimiter. Returns `None` when the content does not open with a
/// `---` line or the block is never closed.
pub(crate) fn split_front_matter(content: &str) -> Option<(&str, &str)> {
	let rest = content.strip_prefix("---")?;
	let rest = rest
		.strip_prefix("\r\n")
		.or_else(|| rest.strip_prefix('\n'))?;

	let mut offset = 0;
	for line in rest.split_inclusive('\n') {
		if line.trim_end_matches(['\r', '\n']) == "---" {
			return Some((&rest[..offset], &rest[offset + line.len()..]));
		}
		offset += line.len();
	}

	None
}
