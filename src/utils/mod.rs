//! Utility functions for fmtrun
//!
//! Package file discovery and small path helpers.

use anyhow::{Result, bail};
use ignore::{DirEntry, WalkBuilder};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Directories a recursive walk never enters
const SKIPPED_DIRS: &[&str] = &["testdata", "vendor"];

/// Suffix that turns a directory specifier into a recursive one (`./...`)
const RECURSIVE_SUFFIX: &str = "...";

/// A package specifier as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSpec {
    /// A single source file
    File(PathBuf),
    /// The source files directly inside one directory
    Dir(PathBuf),
    /// Every package directory below a root (`dir/...`)
    Tree(PathBuf),
}

impl PackageSpec {
    pub fn parse(spec: &Path) -> Self {
        let text = spec.to_string_lossy();
        if let Some(root) = text.strip_suffix(RECURSIVE_SUFFIX) {
            let root = root.trim_end_matches(['/', '\\']);
            let root = if root.is_empty() { "." } else { root };
            return PackageSpec::Tree(PathBuf::from(root));
        }
        if spec.is_dir() {
            PackageSpec::Dir(spec.to_path_buf())
        } else {
            PackageSpec::File(spec.to_path_buf())
        }
    }
}

/// Collect the source files for every specifier, in the order given
///
/// Directory specifiers only contribute their own files, never files in
/// subdirectories. Paths under `base` are returned relative to it. A file
/// reached through several overlapping specifiers is kept once, at its
/// first position.
pub fn discover_files(specs: &[PathBuf], extension: &str, base: &Path) -> Result<Vec<PathBuf>> {
    let extension = extension.trim_start_matches('.');
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for spec in specs {
        let found = match PackageSpec::parse(spec) {
            PackageSpec::File(path) => {
                if !path.is_file() {
                    bail!("Cannot find package or file: {}", path.display());
                }
                vec![path]
            }
            PackageSpec::Dir(dir) => package_files(&dir, extension),
            PackageSpec::Tree(root) => {
                if !root.is_dir() {
                    bail!("Cannot find directory: {}", root.display());
                }
                package_dirs(&root)
                    .iter()
                    .flat_map(|dir| package_files(dir, extension))
                    .collect()
            }
        };

        if found.is_empty() {
            tracing::warn!("No .{} files matched {}", extension, spec.display());
        }
        for file in found {
            let key = std::fs::canonicalize(&file).unwrap_or_else(|_| file.clone());
            if seen.insert(key) {
                files.push(relative_to(&file, base));
            } else {
                tracing::debug!("Skipping duplicate {}", file.display());
            }
        }
    }

    Ok(files)
}

/// Source files directly inside `dir`, sorted by name
pub fn package_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    WalkBuilder::new(dir)
        .standard_filters(false)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.depth() == 1 && !is_ignored_name(entry))
        .map(DirEntry::into_path)
        .filter(|path| path.is_file() && has_extension(path, extension))
        .collect()
}

/// `root` and every directory below it, skipping `testdata`, `vendor` and hidden or `_` directories
pub fn package_dirs(root: &Path) -> Vec<PathBuf> {
    WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            entry.depth() == 0
                || !(is_ignored_name(entry)
                    || SKIPPED_DIRS.iter().any(|dir| entry.file_name() == *dir))
        })
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_dir()))
        .map(DirEntry::into_path)
        .collect()
}

/// Names starting with `.` or `_` are never part of a package
fn is_ignored_name(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.starts_with('_')
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// Express `path` relative to `base` when it lies underneath it
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Check if a command exists in PATH
pub fn command_exists(command: &Path) -> bool {
    which::which(command).is_ok()
}
