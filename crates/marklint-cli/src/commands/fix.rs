use std::fs;
use std::path::{Path, PathBuf};

use marklint_enforce::engine::{check_result, EnforcementEngine, FileFix};
use marklint_enforce::rules::RuleId;
use marklint_enforce::types::{FixApplyDetail, FixApplyResult};
use marklint_output::OutputFormatter;

use super::project;

/// Run the `marklint fix` command.
///
/// Without --apply, outputs fix plans only. With --apply, writes fixes to
/// disk and re-checks to report what remains.
pub fn run(
    formatter: &dyn OutputFormatter,
    verbose: bool,
    paths: Vec<PathBuf>,
    apply: bool,
    rule: Option<String>,
) -> i32 {
    let rule = match rule {
        None => None,
        Some(code) => match RuleId::from_code(&code) {
            Some(r) if r.fix_title().is_some() => Some(r),
            Some(r) => {
                eprintln!("marklint fix: {} has no automatic fix", r.code());
                return 2;
            }
            None => {
                eprintln!("marklint fix: unknown rule code: {}", code);
                return 2;
            }
        },
    };

    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("marklint fix: failed to get current directory: {}", e);
            return 2;
        }
    };

    let project = match project::load(&cwd, &paths) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("marklint fix: {}", e);
            return 2;
        }
    };
    let engine = EnforcementEngine::with_config(&project.config);

    if !apply {
        let result = engine.plan_fixes_with(&project.files, &project.index, rule);
        let output = formatter.format_fix(&result);
        if !output.is_empty() {
            print!("{}", output);
        }
        if verbose {
            eprintln!(
                "marklint fix: {} plans generated for {} files",
                result.violations_addressed, result.files_affected,
            );
        }
        return 0;
    }

    // --apply mode: write fixes to disk, then re-check
    let fixes = engine.apply_fixes_with(&project.files, &project.index, rule);
    let (details, files_modified) = write_fixes(&project.root, fixes);

    let remaining = match project::load(&cwd, &paths) {
        Ok(p) => {
            let engine = EnforcementEngine::with_config(&p.config);
            check_result(&engine.analyze_with(&p.files, &p.index)).errors.len() as u32
        }
        Err(e) => {
            eprintln!("marklint fix: re-check failed: {}", e);
            return 2;
        }
    };

    let result = FixApplyResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        command: "fix".to_string(),
        actions_applied: details.iter().filter(|d| d.status == "applied").count() as u32,
        actions_failed: details.iter().filter(|d| d.status != "applied").count() as u32,
        files_modified,
        recheck_clean: remaining == 0,
        recheck_errors: remaining,
        details,
    };

    let output = formatter.format_fix_apply(&result);
    if !output.is_empty() {
        print!("{}", output);
    }

    if result.actions_failed > 0 || !result.recheck_clean {
        1
    } else {
        0
    }
}

/// Write each changed file. A failed write turns that file's applied
/// actions into failures.
fn write_fixes(root: &Path, fixes: Vec<FileFix>) -> (Vec<FixApplyDetail>, Vec<String>) {
    let mut details = Vec::new();
    let mut files_modified = Vec::new();

    for fix in fixes {
        let changed = fix.changed();
        let mut file_details = fix.details;
        if changed {
            let path = root.join(&fix.path);
            match fs::write(&path, &fix.source) {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "fixes written");
                    files_modified.push(fix.path.display().to_string());
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to write fixes");
                    for detail in file_details.iter_mut().filter(|d| d.status == "applied") {
                        detail.status = "failed".to_string();
                        detail.error = Some(format!("write failed: {}", e));
                    }
                }
            }
        }
        details.extend(file_details);
    }

    (details, files_modified)
}
