//! Test file types for `dmi-rs`

mod document;
mod preview;

/// Scratch path under the system temp directory, unique per test.
fn scratch_path(name: &str) -> std::path::PathBuf {
	std::env::temp_dir().join(format!("dmi-rs-{}-{name}", std::process::id()))
}
