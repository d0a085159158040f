//! Discovery of search-data scripts inside a generated documentation tree.

use ignore::WalkBuilder;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Script names holding the combined (all-sections) search data, e.g. `all_5.js`.
static ALL_SECTIONS_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^all_[0-9a-f]+\.js$").expect("valid regex"));

/// Find every combined search-data script under `dir`, sorted by path.
///
/// Per-section scripts (`classes_*.js`, `functions_*.js`, ...) repeat entries already
/// present in the `all_*` scripts and are skipped. Generated documentation is usually
/// git-ignored, so ignore files are not honoured.
pub fn discover_scripts(dir: &Path) -> Vec<PathBuf> {
    let mut scripts: Vec<PathBuf> = WalkBuilder::new(dir)
        .standard_filters(false)
        .build()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| ALL_SECTIONS_SCRIPT.is_match(name))
        })
        .map(ignore::DirEntry::into_path)
        .collect();

    scripts.sort();
    tracing::debug!(
        "Discovered {} search scripts under {}",
        scripts.len(),
        dir.display()
    );
    scripts
}
