//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `fixture_store`: the index built from the checked-in generator scripts under
//!   `tests/fixtures/search/` (buckets `c` and `d`)
//! - `scenario_store`: the four-entry `d` bucket used by the lookup scenario tests
//!
//! [`TempWorkspace`] provides a temp directory for tests that load from disk.

use docsym::source::{self, RawBucket, RawRecord, RawTarget, SourceFormat};
use docsym::{IndexStore, PartitionRule};
use rstest::fixture;
use std::path::{Path, PathBuf};

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Directory holding the generator's search scripts.
pub fn fixture_dir() -> PathBuf {
    project_root().join("tests/fixtures/search")
}

/// Decode every fixture script, in file name order.
#[allow(dead_code)] // Used across different integration test crates
pub fn fixture_buckets() -> Vec<RawBucket> {
    let mut buckets = Vec::new();
    for path in source::discover_scripts(&fixture_dir()) {
        let text = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read fixture '{}': {}", path.display(), e));
        let decoded = source::decode(SourceFormat::Script, &text)
            .unwrap_or_else(|e| panic!("Failed to decode fixture '{}': {}", path.display(), e));
        buckets.extend(decoded);
    }
    buckets
}

#[fixture]
pub fn fixture_store() -> IndexStore {
    IndexStore::load(fixture_buckets(), PartitionRule::default()).expect("fixture index is valid")
}

/// `Date` (struct, A), `Date` (constructor, B), `day` (function, C), `density` (member, D).
#[fixture]
pub fn scenario_store() -> IndexStore {
    let record = |name: &str, targets: &[(&str, &str)]| RawRecord {
        key: None,
        display_name: name.to_string(),
        targets: targets
            .iter()
            .map(|(scope, url)| RawTarget {
                url: url.to_string(),
                scope: scope.to_string(),
            })
            .collect(),
    };
    IndexStore::load(
        [RawBucket {
            key: Some("d".to_string()),
            records: vec![
                record(
                    "Date",
                    &[
                        ("Date", "A.html"),
                        ("cmf::math::Date::Date(int _day)", "A.html#B"),
                    ],
                ),
                record("day", &[("cmf::math::day()", "math.html#C")]),
                record("density", &[("cmf::upslope::MacroPore", "pore.html#D")]),
            ],
        }],
        PartitionRule::default(),
    )
    .expect("scenario index is valid")
}

/// A temporary directory that is removed when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: tempfile::TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = tempfile::TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
        full_path
    }

    /// Copies every fixture script into `dest_dir` inside this workspace.
    pub fn copy_fixtures(&self, dest_dir: &str) -> PathBuf {
        let dest = self.root.join(dest_dir);
        std::fs::create_dir_all(&dest).expect("Failed to create fixture directory");
        for script in source::discover_scripts(&fixture_dir()) {
            let name = script.file_name().expect("script has a file name");
            std::fs::copy(&script, dest.join(name)).unwrap_or_else(|e| {
                panic!("Failed to copy '{}': {}", script.display(), e)
            });
        }
        dest
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
