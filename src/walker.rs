use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::DepGraphConfig;
use crate::error::AnalyzeError;

/// Expand a glob pattern into the list of source files to analyze.
///
/// Directories are skipped, anything under a `node_modules` directory is always
/// dropped, and files matching one of `config.exclude` are removed. Entries the
/// glob cannot read are logged and skipped. Order is the glob's (alphabetical).
///
/// An empty result is not an error here; the caller decides what "no files" means.
pub fn discover_files(pattern: &str, config: &DepGraphConfig) -> Result<Vec<PathBuf>, AnalyzeError> {
    let entries = glob::glob(pattern).map_err(|source| AnalyzeError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    let excludes = compile_excludes(config);

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(p) => p,
            Err(err) => {
                warn!(path = %err.path().display(), error = %err.error(), "skipping unreadable glob entry");
                continue;
            }
        };

        if !path.is_file() {
            continue;
        }

        // Hard exclusion, independent of config.
        if path_contains_node_modules(&path) {
            continue;
        }

        if is_excluded(&path, &excludes) {
            debug!(path = %path.display(), "excluded by config");
            continue;
        }

        files.push(path);
    }

    debug!(pattern, count = files.len(), "files discovered");
    Ok(files)
}

/// Compile the config's exclude patterns, warning about (and dropping) invalid ones.
fn compile_excludes(config: &DepGraphConfig) -> Vec<glob::Pattern> {
    config
        .exclude
        .iter()
        .flatten()
        .filter_map(|raw| match glob::Pattern::new(raw) {
            Ok(p) => Some(p),
            Err(err) => {
                warn!(pattern = %raw, %err, "ignoring invalid exclude pattern");
                None
            }
        })
        .collect()
}

/// Returns true if any component of `path` is named `node_modules`.
fn path_contains_node_modules(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str().to_str().is_some_and(|s| s == "node_modules"))
}

/// Returns true if `path`, or any trailing run of its components, matches an exclude pattern.
///
/// Matching trailing runs lets a relative pattern like `dist/**` apply no matter
/// where the glob was rooted.
fn is_excluded(path: &Path, patterns: &[glob::Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }
    let components: Vec<_> = path.components().collect();
    (0..components.len()).any(|start| {
        let suffix: PathBuf = components[start..].iter().collect();
        patterns.iter().any(|p| p.matches_path(&suffix))
    })
}
