//! Project discovery and loading shared by `check` and `fix`.

use std::path::{Path, PathBuf};

use marklint_core::config::{MarklintConfig, CONFIG_DIR};
use marklint_parsers::csharp::{parse_files, SourceFile};
use marklint_parsers::semantic::ProjectIndex;
use marklint_parsers::walker::FileWalker;

pub struct Project {
    pub root: PathBuf,
    pub config: MarklintConfig,
    /// Files to report on, with paths relative to `root`.
    pub files: Vec<SourceFile>,
    /// Index over every project file, selected or not.
    pub index: ProjectIndex,
}

/// Nearest ancestor of `start` holding a `.marklint/` directory, else `start`.
pub fn find_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_DIR).is_dir())
        .unwrap_or(start)
        .to_path_buf()
}

/// Parse every project file and keep those under `paths` (all when empty).
///
/// The whole project is indexed regardless of `paths`, so partial types
/// spread over unselected files still resolve.
pub fn load(cwd: &Path, paths: &[PathBuf]) -> Result<Project, String> {
    let root = find_root(cwd);
    let config = MarklintConfig::load(&root.join(CONFIG_DIR));

    let scopes: Vec<PathBuf> = paths.iter().map(|p| cwd.join(p)).collect();
    if let Some(missing) = scopes.iter().find(|p| !p.exists()) {
        return Err(format!("path not found: {}", missing.display()));
    }

    let all = FileWalker::new(&root)
        .with_ignore_patterns(&config.ignore_patterns)
        .walk();
    let mut parsed = Vec::with_capacity(all.len());
    for result in parse_files(&all) {
        match result {
            Ok(file) => parsed.push(file),
            Err(e) => tracing::warn!(error = %e, "skipping file"),
        }
    }

    let index = ProjectIndex::build(parsed.iter().map(|f| &f.tree));
    let indexed = parsed.len();
    let files: Vec<SourceFile> = parsed
        .into_iter()
        .filter(|f| scopes.is_empty() || scopes.iter().any(|s| f.path.starts_with(s)))
        .map(|mut f| {
            if let Ok(relative) = f.path.strip_prefix(&root) {
                f.path = relative.to_path_buf();
            }
            f
        })
        .collect();

    tracing::debug!(
        root = %root.display(),
        indexed,
        selected = files.len(),
        "project loaded"
    );
    Ok(Project {
        root,
        config,
        files,
        index,
    })
}
