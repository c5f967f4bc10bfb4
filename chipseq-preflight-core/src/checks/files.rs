//! File and directory existence checks

use std::path::Path;

use tracing::debug;

use crate::{
    config::PipelineLayout,
    diagnostics::{
        codes,
        Diagnostic,
        DiagnosticCollection,
        Severity,
    },
    report::{
        DirCheck,
        FileCheck,
    },
};

const SOURCE: &str = "files";

/// Check the three files the pipeline cannot start without
pub fn check_required_files(
    layout: &PipelineLayout,
    diagnostics: &mut DiagnosticCollection,
) -> Vec<FileCheck> {
    let files = [
        (layout.config_label(), &layout.config_file),
        ("SRR accession list".to_string(), &layout.accession_list),
        (layout.settings.snakefile.clone(), &layout.snakefile),
    ];

    files
        .into_iter()
        .map(|(label, path)| {
            let exists = path.exists();
            debug!(path = %path.display(), exists, "required file");
            if !exists {
                diagnostics.push(
                    Diagnostic::new(path, Severity::Error, format!("{} not found", label), SOURCE)
                        .with_code(codes::MISSING_FILE),
                );
            }
            FileCheck {
                label,
                path: path.clone(),
                exists,
            }
        })
        .collect()
}

/// Check the raw-data and environment directories (warnings only)
pub fn check_input_dirs(
    layout: &PipelineLayout,
    diagnostics: &mut DiagnosticCollection,
) -> Vec<DirCheck> {
    [
        (&layout.settings.raw_dir, &layout.raw_dir),
        (&layout.settings.envs_dir, &layout.envs_dir),
    ]
    .into_iter()
    .map(|(name, path)| {
        let check = dir_check(PipelineLayout::dir_label(name), path);
        if !check.exists {
            diagnostics.push(
                Diagnostic::new(
                    path,
                    Severity::Warning,
                    format!("{} directory not found", check.label),
                    SOURCE,
                )
                .with_code(codes::MISSING_DIR),
            );
        }
        check
    })
    .collect()
}

/// Check the stage output directories (informational only)
pub fn check_output_dirs(
    layout: &PipelineLayout,
    diagnostics: &mut DiagnosticCollection,
) -> Vec<DirCheck> {
    layout
        .settings
        .output_dirs
        .iter()
        .zip(&layout.output_dirs)
        .map(|(name, path)| {
            let check = dir_check(PipelineLayout::dir_label(name), path);
            if !check.exists {
                diagnostics.push(
                    Diagnostic::new(
                        path,
                        Severity::Info,
                        format!("{} will be created during the pipeline run", check.label),
                        SOURCE,
                    )
                    .with_code(codes::PENDING_OUTPUT),
                );
            }
            check
        })
        .collect()
}

fn dir_check(label: String, path: &Path) -> DirCheck {
    let exists = path.is_dir();
    debug!(path = %path.display(), exists, "directory");
    DirCheck {
        label,
        path: path.to_path_buf(),
        exists,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::PreflightSettings;

    #[test]
    fn test_missing_files_raise_errors() {
        let dir = tempfile::tempdir().unwrap();
        let layout = PipelineLayout::new(dir.path(), PreflightSettings::default());
        fs::create_dir_all(&layout.pipeline_dir).unwrap();
        fs::write(&layout.snakefile, "rule all:\n").unwrap();

        let mut diagnostics = DiagnosticCollection::new();
        let checks = check_required_files(&layout, &mut diagnostics);

        assert_eq!(checks.len(), 3);
        assert_eq!(checks[0].label, "Configuration file (config.yaml)");
        assert!(!checks[0].exists);
        assert_eq!(checks[1].label, "SRR accession list");
        assert!(!checks[1].exists);
        assert_eq!(checks[2].label, "Snakefile");
        assert!(checks[2].exists);
        assert_eq!(diagnostics.by_code(codes::MISSING_FILE).len(), 2);
    }

    #[test]
    fn test_directory_checks_never_raise_errors() {
        let dir = tempfile::tempdir().unwrap();
        let layout = PipelineLayout::new(dir.path(), PreflightSettings::default());
        fs::create_dir_all(&layout.raw_dir).unwrap();
        fs::create_dir_all(&layout.output_dirs[0]).unwrap();

        let mut diagnostics = DiagnosticCollection::new();
        let inputs = check_input_dirs(&layout, &mut diagnostics);
        let outputs = check_output_dirs(&layout, &mut diagnostics);

        assert_eq!(inputs[0].label, "rawfastqs/");
        assert!(inputs[0].exists);
        assert_eq!(inputs[1].label, "envs/");
        assert!(!inputs[1].exists);
        assert_eq!(outputs.len(), 5);
        assert!(outputs[0].exists);
        assert_eq!(outputs[3].label, "04aln/");

        assert!(!diagnostics.summary().has_errors());
        assert_eq!(diagnostics.by_code(codes::MISSING_DIR).len(), 1);
        assert_eq!(diagnostics.by_code(codes::PENDING_OUTPUT).len(), 4);
    }

    #[test]
    fn test_file_in_place_of_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let layout = PipelineLayout::new(dir.path(), PreflightSettings::default());
        fs::create_dir_all(&layout.pipeline_dir).unwrap();
        fs::write(&layout.envs_dir, "not a directory").unwrap();
        fs::write(&layout.output_dirs[0], "").unwrap();

        let mut diagnostics = DiagnosticCollection::new();
        let inputs = check_input_dirs(&layout, &mut diagnostics);
        let outputs = check_output_dirs(&layout, &mut diagnostics);

        assert!(!inputs[1].exists);
        assert!(!outputs[0].exists);
        assert_eq!(diagnostics.by_code(codes::MISSING_DIR).len(), 2);
    }
}
