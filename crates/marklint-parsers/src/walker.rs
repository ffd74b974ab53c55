use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

pub const IGNORE_FILENAME: &str = ".marklintignore";

pub struct FileWalker {
    root: PathBuf,
    excludes: GlobSet,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            excludes: GlobSet::empty(),
        }
    }

    /// Exclude paths (relative to the root) matching any of `patterns`.
    /// Invalid patterns are skipped with a warning.
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => tracing::warn!(pattern = %pattern, error = %e, "invalid ignore pattern"),
            }
        }
        self.excludes = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to compile ignore patterns");
            GlobSet::empty()
        });
        self
    }

    /// All `.cs` files under the root, sorted for stable output.
    pub fn walk(&self) -> Vec<PathBuf> {
        if self.root.is_file() {
            return if is_csharp(&self.root) {
                vec![self.root.clone()]
            } else {
                Vec::new()
            };
        }

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .add_custom_ignore_filename(IGNORE_FILENAME)
            .build();

        let mut paths = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.into_path();
            if !is_csharp(&path) {
                continue;
            }
            let relative = path.strip_prefix(&self.root).unwrap_or(&path);
            if self.excludes.is_match(relative) {
                tracing::debug!(path = %path.display(), "excluded by ignore_patterns");
                continue;
            }
            paths.push(path);
        }

        paths.sort();
        paths
    }
}

fn is_csharp(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "cs")
}
