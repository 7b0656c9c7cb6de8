//! YAML run files.
//!
//! ```yaml
//! cutter:
//!   name: field-a
//!   total_mass: 18.0
//!   simulation_time: 8.0
//! initial:
//!   kind: from_rpm
//!   rpm: 300.0
//! solver:
//!   method: Rk23
//!   rtol: 1.0e-6
//! limits:
//!   max_blades: 6
//! ```
//!
//! The simulated span and sample count always come from the `cutter` block
//! (`simulation_time`, `time_points`); `solver` tunes everything else.

use std::fs;
use std::path::{Path, PathBuf};

use rc_model::{CutterConfig, CutterState, InitialCondition, ParameterLimits, ParameterSet};
use rc_sim::{BatchCase, SimOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunFile {
    pub cutter: CutterConfig,
    #[serde(default)]
    pub initial: InitialCondition,
    #[serde(default)]
    pub solver: Option<SimOptions>,
    #[serde(default)]
    pub limits: ParameterLimits,
}

/// A run file resolved into validated inputs.
#[derive(Clone, Debug)]
pub struct PreparedRun {
    pub name: String,
    pub params: ParameterSet,
    pub initial: CutterState,
    pub options: SimOptions,
    pub limits: ParameterLimits,
}

impl From<PreparedRun> for BatchCase {
    fn from(run: PreparedRun) -> Self {
        BatchCase {
            name: run.name,
            params: run.params,
            initial: run.initial,
            options: run.options,
            limits: run.limits,
        }
    }
}

impl RunFile {
    pub fn load(path: &Path) -> CliResult<Self> {
        debug!(path = %path.display(), "loading run file");
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &Path) -> CliResult<Self> {
        serde_yaml::from_str(text).map_err(|source| CliError::Yaml {
            path: PathBuf::from(path),
            source,
        })
    }

    pub fn options(&self) -> SimOptions {
        SimOptions {
            t_start: 0.0,
            t_end: self.cutter.simulation_time,
            sample_count: self.cutter.time_points,
            ..self.solver.clone().unwrap_or_default()
        }
    }

    /// Derive parameters, initial state and options, validating each.
    pub fn prepare(&self) -> CliResult<PreparedRun> {
        let params = self.cutter.to_parameter_set(&self.limits)?;
        let initial = self.initial.resolve(&self.limits)?;
        let options = self.options();
        options.validate_with(&self.limits)?;
        Ok(PreparedRun {
            name: self.cutter.name.clone(),
            params,
            initial,
            options,
            limits: self.limits.clone(),
        })
    }
}

/// Load and prepare every file, keeping the ones that validate. Rejected
/// files come back with their error.
pub fn prepare_all(paths: &[PathBuf]) -> (Vec<PreparedRun>, Vec<(PathBuf, CliError)>) {
    let mut ready = Vec::with_capacity(paths.len());
    let mut rejected = Vec::new();
    for path in paths {
        match RunFile::load(path).and_then(|file| file.prepare()) {
            Ok(run) => ready.push(run),
            Err(e) => rejected.push((path.clone(), e)),
        }
    }
    (ready, rejected)
}
