//! rc-analysis: performance metrics computed from cutter trajectories.
//!
//! Contains:
//! - metrics (energy balance, efficiency, power, stability, dynamics)
//! - spectrum (discrete Fourier transform of sampled torque)
//! - comparison (rankings, Pareto set and sensitivity across runs)
//! - error (analysis error types)

pub mod comparison;
pub mod error;
pub mod metrics;
pub mod spectrum;

pub use comparison::{
    ComparisonReport, MetricKey, MetricRanking, RankedEntry, Sensitivity, compare,
};
pub use error::{AnalysisError, AnalysisResult};
pub use metrics::{PerformanceMetrics, SignalStatistics, analyze, stability_index};
pub use spectrum::Spectrum;
