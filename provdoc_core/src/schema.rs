use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::ProvdocError;
use crate::ProvdocResult;

/// A single named configuration field accepted by a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
	key: String,
	description: String,
	value: Option<String>,
	secret: bool,
	secret_path: Option<String>,
}

impl Field {
	pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			description: description.into(),
			..Self::default()
		}
	}

	/// Set the value shown for this field in generated examples.
	#[must_use]
	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = Some(value.into());
		self
	}

	/// Mark this field as holding sensitive data.
	#[must_use]
	pub fn secret(mut self) -> Self {
		self.secret = true;
		self
	}

	/// Reference to where a secret value is stored (e.g. a parameter store
	/// path). Safe to publish in place of the secret itself.
	#[must_use]
	pub fn with_secret_path(mut self, path: impl Into<String>) -> Self {
		self.secret_path = Some(path.into());
		self
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn value(&self) -> Option<&str> {
		self.value.as_deref()
	}

	pub fn is_secret(&self) -> bool {
		self.secret
	}

	pub fn secret_path(&self) -> Option<&str> {
		self.secret_path.as_deref()
	}
}

/// The ordered set of configuration fields a provider accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
	fields: Vec<Field>,
}

impl Config {
	/// Build a config schema, rejecting duplicate field keys.
	pub fn new(fields: Vec<Field>) -> ProvdocResult<Self> {
		let mut seen = HashSet::new();
		for field in &fields {
			if !seen.insert(field.key()) {
				return Err(ProvdocError::DuplicateField(field.key().to_string()));
			}
		}

		Ok(Self { fields })
	}

	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	pub fn find_field(&self, key: &str) -> Option<&Field> {
		self.fields.iter().find(|field| field.key() == key)
	}

	/// Dump every field through `dumper` into a key-sorted map.
	pub fn dump(&self, dumper: &impl Dumper) -> ProvdocResult<BTreeMap<String, String>> {
		self.fields
			.iter()
			.map(|field| Ok((field.key().to_string(), dumper.dump_field(field)?)))
			.collect()
	}
}

/// Strategy for turning a field into the value written to a config dump.
pub trait Dumper {
	fn dump_field(&self, field: &Field) -> ProvdocResult<String>;
}

/// Dumps configuration for public documentation. Secret values are replaced
/// by their storage reference and are never written out verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafeDumper;

impl Dumper for SafeDumper {
	fn dump_field(&self, field: &Field) -> ProvdocResult<String> {
		if !field.is_secret() {
			return Ok(field.value().unwrap_or_default().to_string());
		}

		match (field.secret_path(), field.value()) {
			(Some(path), _) => Ok(path.to_string()),
			(None, None) => Ok(String::new()),
			(None, Some(_)) => {
				Err(ProvdocError::Serialization(format!(
					"secret field `{}` has a value but no secret path to publish in its place",
					field.key()
				)))
			}
		}
	}
}
