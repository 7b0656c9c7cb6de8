use std::path::PathBuf;

use rc_analysis::AnalysisError;
use rc_model::ModelError;
use rc_sim::SimError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid run file {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Simulation failed: {message}")]
    RunFailed { message: String },
}
