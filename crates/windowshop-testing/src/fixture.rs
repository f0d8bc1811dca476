//! JSON fixture loader.
//!
//! Loads fixture bundles (catalog, users, orders) for integration tests.

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Load a JSON fixture file relative to the workspace root.
///
/// # Example
/// ```no_run
/// use windowshop_testing::fixture::Fixture;
/// let val = Fixture::load("services/storefront/tests/fixtures/catalog.json");
/// ```
pub struct Fixture;

impl Fixture {
    /// Workspace root: the nearest ancestor of the crate dir holding `Cargo.lock`,
    /// falling back to the one whose `Cargo.toml` declares `[workspace]`.
    pub fn workspace_root() -> PathBuf {
        let dir = std::env::var("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::current_dir().expect("cwd must be readable"));
        dir.ancestors()
            .find(|a| a.join("Cargo.lock").exists() || is_workspace_manifest(a))
            .map(Path::to_path_buf)
            .unwrap_or(dir)
    }

    /// Load and parse a fixture JSON file at `workspace_root/path`.
    ///
    /// Panics if the file is missing or invalid JSON.
    pub fn load(relative_path: &str) -> Value {
        let full_path = Self::workspace_root().join(relative_path);
        let contents = std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("fixture not found at {}: {}", full_path.display(), e));
        serde_json::from_str(&contents)
            .unwrap_or_else(|e| panic!("invalid JSON in fixture {}: {}", relative_path, e))
    }
}

fn is_workspace_manifest(dir: &Path) -> bool {
    std::fs::read_to_string(dir.join("Cargo.toml"))
        .map(|s| s.contains("[workspace]"))
        .unwrap_or(false)
}
