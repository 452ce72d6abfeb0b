use std::collections::BTreeMap;

use serde::Serialize;

use crate::Config;
use crate::ProvdocError;
use crate::ProvdocResult;
use crate::SafeDumper;
use crate::Step;

/// Template for a single provider version page.
pub const INSTRUCTION_TEMPLATE: &str = r"# {{ provider }}@{{ version }}
:::info
When setting up a provider for your deployment, we recommend using the interactive setup workflow which is available from the Providers tab of your admin dashboard.
:::
## Example granted_deployment.yml Configuration
{{ deployment_config }}
{%- for step in steps %}
## {{ step.title }}
### Configuration Fields
This step will guide you through collecting the values for these fields required to setup your provider.

| Field | Description |
| ----------- | ----------- |
{%- for field in step.config_fields %}
| {{ field.key }} | {{ field.description }} |
{%- endfor %}
{{ step.instructions }}
{%- endfor %}
";

/// Template for the registry index page.
pub const REGISTRY_TEMPLATE: &str = r"---
slug: provider-registry
---

# Provider Registry

Common Fate currently develops a range of providers to manage access to different cloud resources.
{%- for provider in providers %}

[{{ provider.name }}]({{ provider.path }})
{%- endfor %}

Let us know if you have a provider you want added!

We are working toward supporting Community providers which will enable teams to build their own providers for anything such as internal tools.
";

/// Static category metadata written next to the index page.
pub const REGISTRY_CATEGORY: &str = "{\n\t\"label\": \"Provider Registry\",\n\t\"position\": 1,\n\t\"link\": { \"type\": \"doc\", \"id\": \"provider-registry\" }\n  }\n  ";

/// A provider entry as written to a deployment config file.
#[derive(Debug, Serialize)]
struct DeploymentProvider<'a> {
	uses: &'a str,
	with: BTreeMap<String, String>,
}

/// Render the example deployment config for a provider as a fenced YAML code
/// block. Config values pass through [`SafeDumper`] so secrets are never
/// written out.
pub fn render_deployment_config(
	config: &Config,
	default_id: &str,
	uses: &str,
) -> ProvdocResult<String> {
	let with = config.dump(&SafeDumper)?;
	let mut document = BTreeMap::new();
	document.insert(default_id, DeploymentProvider { uses, with });

	let yaml = serde_yaml_ng::to_string(&document)
		.map_err(|e| ProvdocError::Serialization(e.to_string()))?;

	Ok(format!("```yaml\n{yaml}\n```"))
}

/// A config field row in a step's table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigFieldRow {
	pub key: String,
	pub description: String,
}

/// A step ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepModel {
	pub title: String,
	pub instructions: String,
	pub config_fields: Vec<ConfigFieldRow>,
}

impl From<&Step> for StepModel {
	fn from(step: &Step) -> Self {
		Self {
			title: step.title.clone(),
			instructions: step.instructions.clone(),
			config_fields: step
				.config_fields
				.iter()
				.map(|field| {
					ConfigFieldRow {
						key: field.key().to_string(),
						description: field.description().to_string(),
					}
				})
				.collect(),
		}
	}
}

/// Everything the instruction template needs for one provider version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionDocument {
	pub provider: String,
	pub version: String,
	/// Pre-formatted fenced code block from [`render_deployment_config`].
	pub deployment_config: String,
	pub steps: Vec<StepModel>,
}

impl InstructionDocument {
	pub fn new(
		provider: impl Into<String>,
		version: impl Into<String>,
		deployment_config: impl Into<String>,
		steps: &[Step],
	) -> Self {
		Self {
			provider: provider.into(),
			version: version.into(),
			deployment_config: deployment_config.into(),
			steps: steps.iter().map(StepModel::from).collect(),
		}
	}
}

/// Render the markdown page for a single provider version.
pub fn render_instructions(document: &InstructionDocument) -> ProvdocResult<String> {
	render("instruction", INSTRUCTION_TEMPLATE, document)
}

/// One link on the registry index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
	/// Display name, `type@version`.
	pub name: String,
	/// Link target relative to the index page, `./type/version`.
	pub path: String,
}

impl RegistryEntry {
	pub fn new(provider_type: &str, version: &str) -> Self {
		Self {
			name: crate::provider::uses(provider_type, version),
			path: format!("./{provider_type}/{version}"),
		}
	}
}

#[derive(Serialize)]
struct RegistryPage<'a> {
	providers: &'a [RegistryEntry],
}

/// Render the registry index page. Entries are linked in the order given.
pub fn render_registry(entries: &[RegistryEntry]) -> ProvdocResult<String> {
	render("registry", REGISTRY_TEMPLATE, &RegistryPage { providers: entries })
}

/// Environment used for every template: markdown output without escaping,
/// trailing newlines kept, undefined values rejected.
pub(crate) fn template_environment<'source>() -> minijinja::Environment<'source> {
	let mut env = minijinja::Environment::new();
	env.set_keep_trailing_newline(true);
	env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
	env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
	env
}

fn render(name: &str, source: &str, ctx: &impl Serialize) -> ProvdocResult<String> {
	let mut env = template_environment();
	env.add_template(name, source)
		.map_err(|e| ProvdocError::TemplateRender(e.to_string()))?;

	let template = env
		.get_template(name)
		.map_err(|e| ProvdocError::TemplateRender(e.to_string()))?;

	template
		.render(minijinja::Value::from_serialize(ctx))
		.map_err(|e| ProvdocError::TemplateRender(e.to_string()))
}
