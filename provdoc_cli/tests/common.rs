use std::collections::BTreeMap;
use std::path::Path;

use assert_cmd::Command;

pub fn provdoc_cmd(cwd: &Path) -> Command {
	let mut cmd = Command::cargo_bin("provdoc").unwrap_or_else(|e| panic!("provdoc binary: {e}"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd.current_dir(cwd);
	cmd
}

pub fn copy_fixture(name: &str, dest: &Path) {
	let fixture = Path::new(env!("CARGO_MANIFEST_DIR"))
		.join("tests/fixtures")
		.join(name);
	copy_dir_recursive(&fixture, dest);
}

fn copy_dir_recursive(src: &Path, dst: &Path) {
	std::fs::create_dir_all(dst)
		.unwrap_or_else(|e| panic!("create_dir_all {}: {e}", dst.display()));
	for entry in
		std::fs::read_dir(src).unwrap_or_else(|e| panic!("read_dir {}: {e}", src.display()))
	{
		let entry = entry.unwrap_or_else(|e| panic!("entry: {e}"));
		let src_path = entry.path();
		let dst_path = dst.join(entry.file_name());

		if src_path.is_dir() {
			copy_dir_recursive(&src_path, &dst_path);
		} else {
			std::fs::copy(&src_path, &dst_path).unwrap_or_else(|e| {
				panic!("copy {} -> {}: {e}", src_path.display(), dst_path.display())
			});
		}
	}
}

pub fn read_tree(root: &Path, dir: &Path, files: &mut BTreeMap<String, String>) {
	for entry in std::fs::read_dir(dir).unwrap_or_else(|e| panic!("read_dir {}: {e}", dir.display()))
	{
		let path = entry.unwrap_or_else(|e| panic!("entry: {e}")).path();
		if path.is_dir() {
			read_tree(root, &path, files);
			continue;
		}

		let name = path
			.strip_prefix(root)
			.unwrap_or_else(|e| panic!("strip_prefix {}: {e}", path.display()))
			.to_string_lossy()
			.replace('\\', "/");
		let content = std::fs::read_to_string(&path)
			.unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
		files.insert(name, content);
	}
}
