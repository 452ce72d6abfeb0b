use crate::Config;
use crate::ConfigSchemaProvider;
use crate::Field;
use crate::Provider;
use crate::ProviderRegistry;
use crate::RegisteredProvider;
use crate::SetupDocProvider;
use crate::SetupDocs;

/// A compiled-in provider whose capabilities are chosen per test.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
	pub config: Option<Config>,
	pub setup_docs: Option<SetupDocs>,
}

impl StaticProvider {
	pub fn documented(config: Config, setup_docs: SetupDocs) -> Self {
		Self {
			config: Some(config),
			setup_docs: Some(setup_docs),
		}
	}
}

impl Provider for StaticProvider {
	fn as_config_schema(&self) -> Option<&dyn ConfigSchemaProvider> {
		self.config.as_ref().map(|_| self as &dyn ConfigSchemaProvider)
	}

	fn as_setup_docs(&self) -> Option<&dyn SetupDocProvider> {
		self.setup_docs.as_ref().map(|_| self as &dyn SetupDocProvider)
	}
}

impl ConfigSchemaProvider for StaticProvider {
	fn config(&self) -> Config {
		self.config.clone().unwrap_or_default()
	}
}

impl SetupDocProvider for StaticProvider {
	fn setup_docs(&self) -> SetupDocs {
		self.setup_docs.clone().unwrap_or_default()
	}
}

/// A provider with neither capability.
pub struct BareProvider;

impl Provider for BareProvider {}

pub fn region_config() -> Config {
	Config::new(vec![Field::new("region", "AWS region").with_value("us-east-1")])
		.expect("unique keys")
}

pub fn region_setup_docs() -> SetupDocs {
	SetupDocs::new().with_doc(
		"01-region.md",
		"---\ntitle: Configure region\nconfigFields:\n  - region\n---\n\nSet your AWS region.\n",
	)
}

pub fn aws_provider() -> RegisteredProvider {
	RegisteredProvider::new(
		StaticProvider::documented(region_config(), region_setup_docs()),
		"aws-v1",
	)
}

/// A registry holding only `aws@v1`.
pub fn aws_registry() -> ProviderRegistry {
	let mut registry = ProviderRegistry::new();
	registry
		.register("aws", "v1", aws_provider())
		.expect("first registration");
	registry
}

/// A provider whose safe dump fails: the secret has a literal value and no
/// reference to publish instead.
pub fn leaky_provider() -> RegisteredProvider {
	let config = Config::new(vec![Field::new("apiToken", "API token").secret().with_value("hunter2")])
		.expect("unique keys");
	let docs = SetupDocs::new().with_doc("01-token.md", "---\ntitle: Create a token\n---\nCreate it.\n");
	RegisteredProvider::new(StaticProvider::documented(config, docs), "okta-v1")
}

pub const EXPECTED_AWS_PAGE: &str = "# aws@v1
:::info
When setting up a provider for your deployment, we recommend using the interactive setup workflow which is available from the Providers tab of your admin dashboard.
:::
## Example granted_deployment.yml Configuration
```yaml
aws-v1:
  uses: aws@v1
  with:
    region: us-east-1

```
## Configure region
### Configuration Fields
This step will guide you through collecting the values for these fields required to setup your provider.

| Field | Description |
| ----------- | ----------- |
| region | AWS region |
Set your AWS region.
";

pub const EXPECTED_EMPTY_INDEX: &str = "---
slug: provider-registry
---

# Provider Registry

Common Fate currently develops a range of providers to manage access to different cloud resources.

Let us know if you have a provider you want added!

We are working toward supporting Community providers which will enable teams to build their own providers for anything such as internal tools.
";
