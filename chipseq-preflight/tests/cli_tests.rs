//! Integration tests for the chipseq-preflight binary
//!
//! Exit codes and output formats are checked by running the real binary
//! against temporary pipeline trees.

use std::{
    fs,
    path::Path,
    process::{
        Command,
        Output,
    },
};

use chipseq_preflight::{
    run,
    Cli,
    OutputFormatArg,
};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn pipeline(config: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "snakemake_ChIPseq_pipeline/config.yaml", config);
    write(dir.path(), "snakemake_ChIPseq_pipeline/Snakefile", "rule all:\n");
    write(dir.path(), "pipeline/SRR_Acc_List.txt", "SRR1\nSRR2\n");
    dir
}

fn preflight(root: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chipseq-preflight"))
        .arg("--root")
        .arg(root)
        .arg("--no-color")
        .args(extra)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run chipseq-preflight")
}

#[test]
fn test_exit_code_ready() {
    let dir = pipeline("idx_bt1: /ref/bt1\nmacs_g: hs\n");
    let output = preflight(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Configuration appears valid!"));
    assert!(stdout.contains("  ✓ Sample range: SRR1 to SRR2"));
}

#[test]
fn test_exit_code_needs_review() {
    let dir = pipeline("idx_bt1: /ref/bt1\n");
    let output = preflight(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✗ Missing required parameter: macs_g"));
}

#[test]
fn test_exit_code_aborted() {
    let dir = pipeline("idx_bt1: /ref/bt1\nmacs_g: hs\n");
    fs::remove_file(dir.path().join("snakemake_ChIPseq_pipeline/Snakefile")).unwrap();
    let output = preflight(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ERROR: Some required files are missing!"));
}

#[test]
fn test_exit_code_tool_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = preflight(&dir.path().join("does-not-exist"), &[]);

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to resolve pipeline layout"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_json_output_parses() {
    let dir = pipeline("idx_bt1: /ref/bt1\n");
    let output = preflight(dir.path(), &["--output", "json"]);

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["valid"], false);
    assert_eq!(value["outcome"]["status"], "needs-review");
    assert_eq!(value["accessions"]["total"], 2);
    assert_eq!(value["required_keys"][1]["key"], "macs_g");
    assert!(value["required_keys"][1]["value"].is_null());
}

#[test]
fn test_json_lines_output() {
    let dir = pipeline("idx_bt1: /ref/bt1\nmacs_g: hs\n");
    let output = preflight(dir.path(), &["--output", "json-lines"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> =
        stdout.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    let summary = lines.last().unwrap();
    assert_eq!(summary["valid"], true);
    assert_eq!(summary["outcome"]["status"], "ready");
    assert_eq!(summary["summary"]["errors"], 0);
}

#[test]
fn test_root_from_environment() {
    let dir = pipeline("idx_bt1: /ref/bt1\nmacs_g: hs\n");
    let output = Command::new(env!("CARGO_BIN_EXE_chipseq-preflight"))
        .arg("--no-color")
        .env("CHIPSEQ_PIPELINE_ROOT", dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_run_writes_report() {
    let dir = pipeline("idx_bt1: /ref/bt1\nmacs_g: hs\n");
    let cli = Cli {
        root:     Some(dir.path().to_path_buf()),
        output:   OutputFormatArg::Human,
        no_color: true,
        verbose:  false,
    };

    let mut out = Vec::new();
    let code = run(&cli, &mut out).unwrap();

    assert_eq!(code, 0);
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with(&format!("\n{}\n", "=".repeat(80))));
    assert!(text.contains("REQUIRED DIRECTORIES CHECK"));
}
