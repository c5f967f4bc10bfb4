//! Configuration management for the preflight checker
//!
//! [`PreflightSettings`] describes where the pipeline keeps its files and
//! which configuration keys are mandatory. The defaults reproduce the layout
//! of the ChIP-seq Snakemake pipeline; a `preflight.toml` in the pipeline
//! root can override any of them. [`PipelineLayout`] is the resolved set of
//! absolute paths the checks operate on.

use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::debug;

use crate::error::{
    PreflightError,
    PreflightResult,
};

/// Settings file names searched in the pipeline root, first match wins
pub const SETTINGS_FILE_NAMES: [&str; 3] =
    ["preflight.toml", ".preflight.toml", ".config/preflight.toml"];

/// Layout and validation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreflightSettings {
    /// Snakemake pipeline directory, relative to the root
    pub pipeline_dir:   String,
    /// Configuration file, relative to the pipeline directory
    pub config_file:    String,
    /// Snakefile, relative to the pipeline directory
    pub snakefile:      String,
    /// Accession list, relative to the root
    pub accession_list: String,
    /// Raw FASTQ directory, relative to the pipeline directory
    pub raw_dir:        String,
    /// Conda environment directory, relative to the pipeline directory
    pub envs_dir:       String,
    /// Stage output directories, relative to the pipeline directory
    pub output_dirs:    Vec<String>,
    /// Configuration keys the pipeline cannot run without
    pub required_keys:  Vec<String>,
    /// Extension of environment definition files (without the dot)
    pub env_extension:  String,
    /// Conda environment suggested in the summary
    pub conda_env:      String,
}

impl Default for PreflightSettings {
    fn default() -> Self {
        Self {
            pipeline_dir:   "snakemake_ChIPseq_pipeline".to_string(),
            config_file:    "config.yaml".to_string(),
            snakefile:      "Snakefile".to_string(),
            accession_list: "pipeline/SRR_Acc_List.txt".to_string(),
            raw_dir:        "rawfastqs".to_string(),
            envs_dir:       "envs".to_string(),
            output_dirs:    ["01seq", "02fqc", "03seqClean", "04aln", "05peak"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            required_keys:  vec!["idx_bt1".to_string(), "macs_g".to_string()],
            env_extension:  "yaml".to_string(),
            conda_env:      "chipseq".to_string(),
        }
    }
}

impl PreflightSettings {
    /// Load settings from the pipeline root, falling back to defaults
    pub fn load(root: &Path) -> PreflightResult<Self> {
        for name in SETTINGS_FILE_NAMES {
            let path = root.join(name);
            if !path.is_file() {
                continue;
            }

            debug!(path = %path.display(), "loading preflight settings");
            let content = std::fs::read_to_string(&path)
                .map_err(|e| PreflightError::settings(&path, e.to_string()))?;
            return Self::from_toml(&content)
                .map_err(|message| PreflightError::settings(&path, message));
        }

        Ok(Self::default())
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, String> {
        let settings: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        if settings.env_extension.trim_start_matches('.').is_empty() {
            return Err("env_extension must not be empty".to_string());
        }
        Ok(settings)
    }
}

/// Absolute paths of everything the checks look at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineLayout {
    /// Pipeline root the other paths are resolved against
    pub root:           PathBuf,
    /// Snakemake pipeline directory
    pub pipeline_dir:   PathBuf,
    /// Pipeline configuration (YAML)
    pub config_file:    PathBuf,
    /// Accession list (one accession per line)
    pub accession_list: PathBuf,
    /// Snakefile
    pub snakefile:      PathBuf,
    /// Raw FASTQ input directory
    pub raw_dir:        PathBuf,
    /// Conda environment directory
    pub envs_dir:       PathBuf,
    /// Stage output directories
    pub output_dirs:    Vec<PathBuf>,
    /// Settings the layout was resolved from
    pub settings:       PreflightSettings,
}

impl PipelineLayout {
    /// Resolve the layout for `root` with explicit settings
    pub fn new(root: impl Into<PathBuf>, settings: PreflightSettings) -> Self {
        let root = root.into();
        let pipeline_dir = root.join(&settings.pipeline_dir);

        Self {
            config_file: pipeline_dir.join(&settings.config_file),
            accession_list: root.join(&settings.accession_list),
            snakefile: pipeline_dir.join(&settings.snakefile),
            raw_dir: pipeline_dir.join(&settings.raw_dir),
            envs_dir: pipeline_dir.join(&settings.envs_dir),
            output_dirs: settings.output_dirs.iter().map(|d| pipeline_dir.join(d)).collect(),
            pipeline_dir,
            root,
            settings,
        }
    }

    /// Resolve the layout for `root`, loading `preflight.toml` if present
    pub fn discover(root: &Path) -> PreflightResult<Self> {
        let root = root
            .canonicalize()
            .map_err(|_| PreflightError::InvalidRoot(root.to_path_buf()))?;
        if !root.is_dir() {
            return Err(PreflightError::InvalidRoot(root));
        }

        let settings = PreflightSettings::load(&root)?;
        Ok(Self::new(root, settings))
    }

    /// Label for the configuration file in the report
    pub fn config_label(&self) -> String {
        format!("Configuration file ({})", self.settings.config_file)
    }

    /// Label for a pipeline-relative directory in the report
    pub fn dir_label(name: &str) -> String {
        format!("{}/", name.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_matches_pipeline_tree() {
        let layout = PipelineLayout::new("/work", PreflightSettings::default());

        assert_eq!(
            layout.config_file,
            PathBuf::from("/work/snakemake_ChIPseq_pipeline/config.yaml")
        );
        assert_eq!(layout.accession_list, PathBuf::from("/work/pipeline/SRR_Acc_List.txt"));
        assert_eq!(
            layout.snakefile,
            PathBuf::from("/work/snakemake_ChIPseq_pipeline/Snakefile")
        );
        assert_eq!(layout.output_dirs.len(), 5);
        assert!(layout.output_dirs[4].ends_with("05peak"));
        assert_eq!(layout.config_label(), "Configuration file (config.yaml)");
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings = PreflightSettings::from_toml(
            r#"
required_keys = ["idx_bt1", "macs_g", "genome_fa"]
env_extension = "yml"
"#,
        )
        .unwrap();

        assert_eq!(settings.required_keys.len(), 3);
        assert_eq!(settings.env_extension, "yml");
        assert_eq!(settings.pipeline_dir, "snakemake_ChIPseq_pipeline");
    }

    #[test]
    fn test_unknown_settings_field_rejected() {
        assert!(PreflightSettings::from_toml("pipline_dir = \"x\"").is_err());
        assert!(PreflightSettings::from_toml("env_extension = \".\"").is_err());
    }

    #[test]
    fn test_load_settings_from_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("preflight.toml"), "conda_env = \"chip\"\n").unwrap();

        let settings = PreflightSettings::load(dir.path()).unwrap();
        assert_eq!(settings.conda_env, "chip");

        std::fs::write(dir.path().join("preflight.toml"), "conda_env = [").unwrap();
        let err = PreflightSettings::load(dir.path()).unwrap_err();
        assert!(matches!(err, PreflightError::Settings { .. }));
    }

    #[test]
    fn test_discover_rejects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        assert!(matches!(
            PipelineLayout::discover(&missing),
            Err(PreflightError::InvalidRoot(_))
        ));

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(
            PipelineLayout::discover(&file),
            Err(PreflightError::InvalidRoot(_))
        ));
    }
}
