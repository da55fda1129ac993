//! Finding userscript files under the paths given on the command line.

use super::config::CliError;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// File name suffix of a userscript.
pub const USERSCRIPT_SUFFIX: &str = ".user.js";

/// Configuration for directory walking.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkConfig {
    /// Whether to include hidden files and directories (starting with `.`).
    pub include_hidden: bool,
    /// Whether to respect `.gitignore` rules (only works in git repos).
    pub respect_gitignore: bool,
}

impl WalkConfig {
    /// Creates a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to include hidden files.
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Sets whether to respect .gitignore rules.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }
}

/// Returns true if the path names a userscript file.
pub fn is_userscript(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(USERSCRIPT_SUFFIX))
}

/// Collects the files to check.
///
/// Files named explicitly are kept whatever their name; directories are
/// searched for `*.user.js` files. The result is sorted and deduplicated.
pub fn find_userscripts(paths: &[PathBuf], config: &WalkConfig) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            files.extend(walk_directory(path, config));
        } else {
            return Err(CliError::PathNotFound(path.clone()));
        }
    }

    files.sort();
    files.dedup();

    if files.is_empty() {
        return Err(CliError::NoUserscripts);
    }
    debug!("Found {} userscript(s)", files.len());
    Ok(files)
}

fn walk_directory(root: &Path, config: &WalkConfig) -> Vec<PathBuf> {
    debug!(
        "Searching {:?} (hidden={}, gitignore={})",
        root, config.include_hidden, config.respect_gitignore
    );

    let walker = WalkBuilder::new(root)
        .hidden(!config.include_hidden)
        .ignore(false)
        .git_ignore(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .follow_links(false)
        .build();

    walker
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| is_userscript(path))
        .inspect(|path| trace!("Userscript: {}", path.display()))
        .collect()
}
