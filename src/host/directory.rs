//! Filesystem-backed source graph: one unit per source file.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::{Pattern, glob};
use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::{Config, TEST_FILE_PATTERNS};
use crate::core::collect::{SourceGraph, SourceUnit};
use crate::core::extract::CommentBlock;
use crate::host::comments::extract_comment_blocks;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// One source file. Comments are read on demand.
///
/// The id is the file path relative to the scan root, so marker positions name the file.
/// `package` is the containing directory and groups files the way a Go package does.
#[derive(Debug, Clone)]
pub struct FileUnit {
    id: String,
    package: String,
    path: PathBuf,
}

impl FileUnit {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn package(&self) -> &str {
        &self.package
    }
}

impl SourceUnit for FileUnit {
    fn id(&self) -> &str {
        &self.id
    }

    fn imports(&self) -> &[String] {
        &[]
    }

    fn comment_blocks(&self) -> Result<Vec<CommentBlock>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read file: {}", self.path.display()))?;
        Ok(extract_comment_blocks(&content))
    }
}

/// Every matching source file under a root. All units are roots.
#[derive(Debug, Clone, Default)]
pub struct DirectoryGraph {
    units: BTreeMap<String, FileUnit>,
}

impl DirectoryGraph {
    /// Walk `root` and collect matching files.
    ///
    /// `includes`, `ignores`, `extensions` and `ignore_test_files` come from `config`.
    /// Unit ids are file paths relative to `root` with `/` separators. A file's package is
    /// its parent directory, or `.` at the root.
    pub fn scan(root: &Path, config: &Config) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("Cannot access source root: {}", root.display()))?;

        let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
        let mut glob_patterns: Vec<Pattern> = Vec::new();

        for p in &config.ignores {
            if is_glob_pattern(p) {
                let pattern = Pattern::new(p)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))?;
                glob_patterns.push(pattern);
            } else {
                literal_ignore_paths.push(root.join(p));
            }
        }

        if config.ignore_test_files {
            for p in TEST_FILE_PATTERNS {
                glob_patterns.push(Pattern::new(p)?);
            }
        }

        let dirs_to_scan = resolve_includes(&root, &config.includes)?;

        let mut units: BTreeMap<String, FileUnit> = BTreeMap::new();
        for dir in dirs_to_scan {
            for entry in WalkDir::new(&dir) {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        warn!("Cannot access path: {}", e);
                        continue;
                    }
                };
                let path = entry.path();
                if !path.is_file() || !has_extension(path, &config.extensions) {
                    continue;
                }
                if literal_ignore_paths
                    .iter()
                    .any(|ignore_path| path.starts_with(ignore_path))
                {
                    continue;
                }

                let relative = path.strip_prefix(&root).unwrap_or(path);
                let relative_str = to_slash(relative);
                if glob_patterns.iter().any(|p| p.matches(&relative_str)) {
                    debug!("ignoring {}", relative_str);
                    continue;
                }

                let package = relative
                    .parent()
                    .map(to_slash)
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| ".".to_string());
                // Overlapping includes can yield the same file twice
                units
                    .entry(relative_str.clone())
                    .or_insert_with(|| FileUnit {
                        id: relative_str,
                        package,
                        path: path.to_path_buf(),
                    });
            }
        }

        Ok(Self { units })
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit_ids(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    /// Distinct packages (directories) holding at least one unit.
    pub fn packages(&self) -> BTreeSet<&str> {
        self.units.values().map(FileUnit::package).collect()
    }
}

impl SourceGraph for DirectoryGraph {
    type Unit = FileUnit;

    fn roots(&self) -> Vec<String> {
        self.units.keys().cloned().collect()
    }

    fn unit(&self, id: &str) -> Option<&FileUnit> {
        self.units.get(id)
    }
}

fn resolve_includes(root: &Path, includes: &[String]) -> Result<Vec<PathBuf>> {
    if includes.is_empty() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut paths = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            let full_pattern = root.join(inc);
            let pattern_str = full_pattern.to_string_lossy();
            let entries = glob(&pattern_str)
                .with_context(|| format!("Invalid glob pattern in 'includes': \"{}\"", inc))?;
            paths.extend(entries.flatten().filter(|entry| entry.is_dir()));
        } else {
            let path = root.join(inc);
            if path.exists() {
                paths.push(path);
            } else {
                warn!("Include path does not exist: {}", path.display());
            }
        }
    }
    Ok(paths)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
