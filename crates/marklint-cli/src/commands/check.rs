use marklint_enforce::engine::{check_result, EnforcementEngine};
use marklint_output::OutputFormatter;
use std::path::PathBuf;

use super::project;

/// Run `marklint check`: report violations, exit 1 if any remain.
pub fn run(formatter: &dyn OutputFormatter, verbose: bool, paths: Vec<PathBuf>) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("marklint check: failed to get current directory: {}", e);
            return 2;
        }
    };

    let project = match project::load(&cwd, &paths) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("marklint check: {}", e);
            return 2;
        }
    };

    let engine = EnforcementEngine::with_config(&project.config);
    let reports = engine.analyze_with(&project.files, &project.index);
    let result = check_result(&reports);

    let output = formatter.format_check(&result);
    if !output.is_empty() {
        print!("{}", output);
    }
    if verbose {
        eprintln!(
            "marklint check: {} files analyzed, {} errors",
            result.files_analyzed.len(),
            result.errors.len(),
        );
    }

    if result.errors.is_empty() {
        0
    } else {
        1
    }
}
