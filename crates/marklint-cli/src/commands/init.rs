use std::fs;
use std::path::Path;

use marklint_core::config::{MarklintConfig, CONFIG_DIR, CONFIG_FILE};
use marklint_parsers::walker::IGNORE_FILENAME;

const DEFAULT_IGNORE: &str = "\
# Paths excluded from marklint (gitignore syntax)
Library/
Temp/
Logs/
obj/
";

/// Run `marklint init`: write `.marklint/marklint.json` and a `.marklintignore`.
pub fn run(verbose: bool, force: bool) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("marklint init: failed to get current directory: {}", e);
            return 2;
        }
    };
    init_in(&cwd, verbose, force)
}

fn init_in(root: &Path, verbose: bool, force: bool) -> i32 {
    let config_dir = root.join(CONFIG_DIR);
    if config_dir.join(CONFIG_FILE).exists() && !force {
        eprintln!(
            "marklint init: {}/{} already exists (use --force to overwrite)",
            CONFIG_DIR, CONFIG_FILE
        );
        return 2;
    }

    let config = MarklintConfig {
        version: env!("CARGO_PKG_VERSION").to_string(),
        ..MarklintConfig::default()
    };
    if let Err(e) = config.save(&config_dir) {
        eprintln!("marklint init: failed to write config: {}", e);
        return 2;
    }

    create_ignore_file(root, verbose);

    if verbose {
        eprintln!("marklint init: initialized in {}", root.display());
    }
    0
}

/// Write a default `.marklintignore` unless one exists.
fn create_ignore_file(root: &Path, verbose: bool) {
    let path = root.join(IGNORE_FILENAME);
    if path.exists() {
        return;
    }
    match fs::write(&path, DEFAULT_IGNORE) {
        Ok(()) if verbose => eprintln!("marklint init: created {}", IGNORE_FILENAME),
        Ok(()) => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to create ignore file"),
    }
}
