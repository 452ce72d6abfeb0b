use std::io::ErrorKind;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::ProvdocError;
use crate::ProvdocResult;

/// Default output root, relative to the working directory.
pub const DEFAULT_OUTPUT_ROOT: &str = "docs/approvals/providers/registry";

/// File name of the registry index page.
pub const REGISTRY_INDEX_FILE: &str = "00-provider-registry.md";

/// File name of the category metadata document.
pub const REGISTRY_CATEGORY_FILE: &str = "_category_.json";

/// The generated documentation directory.
///
/// Creating an `OutputDir` wipes whatever a previous run left behind, so the
/// tree only ever holds output from the current run.
#[derive(Debug)]
pub struct OutputDir {
	root: PathBuf,
}

impl OutputDir {
	/// Delete `root` if it exists, then create it empty.
	pub fn recreate(root: impl Into<PathBuf>) -> ProvdocResult<Self> {
		let root = root.into();

		match std::fs::remove_dir_all(&root) {
			Ok(()) => tracing::debug!(root = %root.display(), "removed previous output"),
			Err(e) if e.kind() == ErrorKind::NotFound => {}
			Err(e) => return Err(ProvdocError::filesystem(&root, e)),
		}

		std::fs::create_dir_all(&root).map_err(|e| ProvdocError::filesystem(&root, e))?;

		Ok(Self { root })
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Write `content` to `relative` below the root, creating parent
	/// directories on demand. Existing files are truncated. Returns the full
	/// path written.
	///
	/// `relative` may only hold normal components; absolute paths and `..`
	/// are rejected before anything is written.
	pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> ProvdocResult<PathBuf> {
		let relative = relative.as_ref();
		let stays_below_root = relative
			.components()
			.all(|component| matches!(component, Component::Normal(_)));
		if !stays_below_root || relative.as_os_str().is_empty() {
			return Err(ProvdocError::OutputPathEscapesRoot(
				relative.display().to_string(),
			));
		}

		let path = self.root.join(relative);

		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent).map_err(|e| ProvdocError::filesystem(parent, e))?;
		}

		std::fs::write(&path, content).map_err(|e| ProvdocError::filesystem(&path, e))?;
		Ok(path)
	}
}
