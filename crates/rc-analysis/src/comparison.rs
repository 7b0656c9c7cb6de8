//! Ranking and trade-off analysis across several runs.

use std::fmt;
use std::str::FromStr;

use rc_core::{mean, peak_to_peak, std_dev};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::metrics::PerformanceMetrics;

/// Scalar metric that can be ranked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Efficiency,
    EfficiencyAverage,
    EnergyTotal,
    EnergyUseful,
    PowerAvg,
    PowerMax,
    OmegaStability,
    TorqueStability,
    PowerStability,
    AreaCut,
    AreaEfficiency,
    SettlingTime,
    DominantFrequency,
}

impl MetricKey {
    pub const ALL: [MetricKey; 13] = [
        Self::Efficiency,
        Self::EfficiencyAverage,
        Self::EnergyTotal,
        Self::EnergyUseful,
        Self::PowerAvg,
        Self::PowerMax,
        Self::OmegaStability,
        Self::TorqueStability,
        Self::PowerStability,
        Self::AreaCut,
        Self::AreaEfficiency,
        Self::SettlingTime,
        Self::DominantFrequency,
    ];

    /// Metrics ranked when the caller names none.
    pub const DEFAULT: [MetricKey; 5] = [
        Self::Efficiency,
        Self::EnergyTotal,
        Self::PowerAvg,
        Self::OmegaStability,
        Self::AreaEfficiency,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Efficiency => "efficiency",
            Self::EfficiencyAverage => "efficiency_average",
            Self::EnergyTotal => "energy_total",
            Self::EnergyUseful => "energy_useful",
            Self::PowerAvg => "power_avg",
            Self::PowerMax => "power_max",
            Self::OmegaStability => "omega_stability",
            Self::TorqueStability => "torque_stability",
            Self::PowerStability => "power_stability",
            Self::AreaCut => "area_cut",
            Self::AreaEfficiency => "area_efficiency",
            Self::SettlingTime => "settling_time",
            Self::DominantFrequency => "dominant_frequency",
        }
    }

    pub fn value(self, m: &PerformanceMetrics) -> f64 {
        match self {
            Self::Efficiency => m.efficiency,
            Self::EfficiencyAverage => m.efficiency_average,
            Self::EnergyTotal => m.energy_total,
            Self::EnergyUseful => m.energy_useful,
            Self::PowerAvg => m.power_avg,
            Self::PowerMax => m.power_max,
            Self::OmegaStability => m.omega_stability,
            Self::TorqueStability => m.torque_stability,
            Self::PowerStability => m.power_stability,
            Self::AreaCut => m.area_cut,
            Self::AreaEfficiency => m.area_efficiency,
            Self::SettlingTime => m.settling_time,
            Self::DominantFrequency => m.dominant_frequency,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKey {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| AnalysisError::UnknownMetric { name: s.to_string() })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based
    pub rank: usize,
    pub name: String,
    pub value: f64,
}

/// Entries ordered by one metric, highest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricRanking {
    pub metric: MetricKey,
    pub entries: Vec<RankedEntry>,
}

impl MetricRanking {
    pub fn best(&self) -> Option<&RankedEntry> {
        self.entries.first()
    }
}

/// Spread of one metric across the compared runs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sensitivity {
    pub metric: MetricKey,
    pub mean: f64,
    pub std: f64,
    pub range: f64,
    /// `std / (mean + 1e-10)`
    pub coefficient_of_variation: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub rankings: Vec<MetricRanking>,
    /// Runs not dominated in (maximize efficiency, minimize average power).
    pub pareto: Vec<String>,
    pub sensitivity: Vec<Sensitivity>,
}

impl ComparisonReport {
    pub fn ranking(&self, metric: MetricKey) -> Option<&MetricRanking> {
        self.rankings.iter().find(|r| r.metric == metric)
    }
}

fn dominates(a: &PerformanceMetrics, b: &PerformanceMetrics) -> bool {
    a.efficiency >= b.efficiency
        && a.power_avg <= b.power_avg
        && (a.efficiency > b.efficiency || a.power_avg < b.power_avg)
}

/// Rank `entries` by each of `keys` (all of [`MetricKey::DEFAULT`] when empty).
///
/// Ties keep input order. Fails on an empty `entries`.
pub fn compare(
    entries: &[(String, PerformanceMetrics)],
    keys: &[MetricKey],
) -> AnalysisResult<ComparisonReport> {
    if entries.is_empty() {
        return Err(AnalysisError::InvalidArg {
            what: "nothing to compare",
        });
    }
    let keys: &[MetricKey] = if keys.is_empty() { &MetricKey::DEFAULT } else { keys };

    let rankings = keys
        .iter()
        .map(|&metric| {
            let mut order: Vec<(&str, f64)> = entries
                .iter()
                .map(|(name, m)| (name.as_str(), metric.value(m)))
                .collect();
            order.sort_by(|a, b| b.1.total_cmp(&a.1));
            MetricRanking {
                metric,
                entries: order
                    .into_iter()
                    .enumerate()
                    .map(|(i, (name, value))| RankedEntry {
                        rank: i + 1,
                        name: name.to_string(),
                        value,
                    })
                    .collect(),
            }
        })
        .collect();

    let pareto = entries
        .iter()
        .enumerate()
        .filter(|(i, (_, mi))| {
            !entries
                .iter()
                .enumerate()
                .any(|(j, (_, mj))| j != *i && dominates(mj, mi))
        })
        .map(|(_, (name, _))| name.clone())
        .collect();

    let sensitivity = keys
        .iter()
        .map(|&metric| {
            let values: Vec<f64> = entries.iter().map(|(_, m)| metric.value(m)).collect();
            let mean = mean(&values);
            let std = std_dev(&values);
            Sensitivity {
                metric,
                mean,
                std,
                range: peak_to_peak(&values),
                coefficient_of_variation: std / (mean + 1e-10),
            }
        })
        .collect();

    Ok(ComparisonReport {
        rankings,
        pareto,
        sensitivity,
    })
}
