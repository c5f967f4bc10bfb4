//! Individual pipeline checks
//!
//! Each check inspects one part of the pipeline tree, records what it saw in
//! report types and pushes its findings as diagnostics. Sequencing and the
//! hard/soft failure policy live in [`crate::validation`].

pub mod accessions;
pub mod environments;
pub mod files;
pub mod pipeline_config;

pub use accessions::AccessionList;
pub use environments::list_environment_files;
pub use files::{
    check_input_dirs,
    check_output_dirs,
    check_required_files,
};
pub use pipeline_config::{
    ConfigLoadError,
    PipelineConfig,
};
