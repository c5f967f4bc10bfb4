//! Conda environment definitions

use std::path::Path;

use tracing::{
    debug,
    warn,
};
use walkdir::WalkDir;

use crate::diagnostics::{
    codes,
    Diagnostic,
    DiagnosticCollection,
    Severity,
};

const SOURCE: &str = "environments";

/// List environment definition files directly inside `dir`
///
/// Returns `None` when `dir` is not a directory. Regular files and symlinks
/// whose name ends in `.<extension>` are listed by name, sorted. Links are not
/// resolved, so a dangling link is still listed. Subdirectories are not
/// searched. Entries that cannot be read are skipped with a warning.
pub fn list_environment_files(
    dir: &Path,
    extension: &str,
    diagnostics: &mut DiagnosticCollection,
) -> Option<Vec<String>> {
    if !dir.is_dir() {
        debug!(path = %dir.display(), "environment directory not found");
        return None;
    }

    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                warn!(path = %path.display(), error = %e, "skipping unreadable environment entry");
                diagnostics.push(
                    Diagnostic::new(
                        &path,
                        Severity::Warning,
                        format!("Could not read environment entry: {}", e),
                        SOURCE,
                    )
                    .with_code(codes::UNREADABLE_ENVIRONMENT),
                );
                continue;
            },
        };

        let file_type = entry.file_type();
        if !(file_type.is_file() || file_type.is_symlink()) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.ends_with(&suffix) {
            files.push(name.into_owned());
        }
    }

    files.sort();
    debug!(path = %dir.display(), count = files.len(), "environment definitions");
    Some(files)
}
