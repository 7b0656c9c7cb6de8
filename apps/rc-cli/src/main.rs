mod config;
mod error;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rc_analysis::{MetricKey, PerformanceMetrics, analyze, compare};
use rc_core::units::rad_per_s_to_rpm;
use rc_model::{InertiaBreakdown, TorqueBreakdown, TorqueModel};
use rc_sim::{BatchCase, RunStatistics, Trajectory, simulate_batch, simulate_with};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use config::{RunFile, prepare_all};
use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "rc-cli")]
#[command(about = "Rotary cutter dynamics simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a run file: parameters, initial condition and solver options
    Validate {
        /// Path to the run YAML file
        path: PathBuf,
    },
    /// Simulate one run file and print its statistics and performance metrics
    Run {
        /// Path to the run YAML file
        path: PathBuf,
        /// End time in seconds (overrides cutter.simulation_time)
        #[arg(long)]
        t_end: Option<f64>,
        /// Number of output samples (overrides cutter.time_points)
        #[arg(long)]
        samples: Option<usize>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Write the sampled trajectory as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Simulate several run files in parallel and rank them
    Compare {
        /// Paths to run YAML files
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
        /// Metric to rank by; repeatable (default: a standard set)
        #[arg(short, long = "metric")]
        metrics: Vec<MetricKey>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct RunReport<'a> {
    name: &'a str,
    wall_time_s: f64,
    n_evaluations: usize,
    final_rpm: f64,
    final_torque: TorqueBreakdown,
    statistics: RunStatistics,
    metrics: PerformanceMetrics,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => cmd_validate(&path),
        Commands::Run {
            path,
            t_end,
            samples,
            json,
            output,
        } => cmd_run(&path, t_end, samples, json, output.as_deref()),
        Commands::Compare {
            paths,
            metrics,
            json,
        } => cmd_compare(&paths, &metrics, json),
    }
}

fn cmd_validate(path: &Path) -> CliResult<()> {
    println!("Validating run file: {}", path.display());
    let run = RunFile::load(path)?.prepare()?;
    println!("✓ Run file is valid");
    println!("  Name: {}", run.name);
    let inertia = InertiaBreakdown::of(&run.params);
    println!(
        "  Inertia: {:.4} kg·m² (plate {:.4}, blades {:.4})",
        inertia.total, inertia.plate, inertia.blades
    );
    println!("  Vegetation torque: {}", run.params.vegetation_label());
    println!(
        "  Span: {:.3} s, {} samples, {:?}",
        run.options.t_end - run.options.t_start,
        run.options.sample_count,
        run.options.method
    );
    Ok(())
}

fn cmd_run(
    path: &Path,
    t_end: Option<f64>,
    samples: Option<usize>,
    json: bool,
    output: Option<&Path>,
) -> CliResult<()> {
    let mut run = RunFile::load(path)?.prepare()?;
    if let Some(t_end) = t_end {
        run.options.t_end = t_end;
    }
    if let Some(samples) = samples {
        run.options.sample_count = samples;
    }

    let traj = simulate_with(&run.params, run.initial, &run.options, &run.limits)?;
    if !traj.success {
        return Err(CliError::RunFailed {
            message: traj.message,
        });
    }
    let metrics = analyze(&traj);
    let final_state = traj.final_state().unwrap_or_default();
    let final_torque = TorqueModel::new(&run.params)
        .breakdown(traj.final_time().unwrap_or(0.0), final_state.omega_rad_s);

    if let Some(output) = output {
        write_csv(&traj, output)?;
    }

    let report = RunReport {
        name: &run.name,
        wall_time_s: traj.wall_time_s,
        n_evaluations: traj.n_evaluations,
        final_rpm: rad_per_s_to_rpm(final_state.omega_rad_s),
        final_torque,
        statistics: traj.statistics(),
        metrics: metrics.without_series(),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    if let Some(output) = output {
        println!("✓ Trajectory written to {}", output.display());
    }
    Ok(())
}

fn print_report(report: &RunReport<'_>) {
    let s = &report.statistics;
    let m = &report.metrics;
    println!("✓ Simulation completed: {}", report.name);
    println!(
        "  {} evaluations in {:.3} s",
        report.n_evaluations, report.wall_time_s
    );
    println!("Motion:");
    println!("  Duration:        {:>12.3} s", s.duration);
    println!("  Angle range:     {:>12.3} rad", s.angle_range);
    println!("  Final speed:     {:>12.1} rpm", report.final_rpm);
    println!("  |ω| max:         {:>12.3} rad/s", s.omega_abs_max);
    println!("  ω rms:           {:>12.3} rad/s", s.omega_rms);
    println!("  |τ| max:         {:>12.3} N·m", s.torque_abs_max);
    println!("  Final KE:        {:>12.3} J", s.kinetic_energy_final);
    let tq = &report.final_torque;
    println!("Final torques:");
    println!("  Input:           {:>12.3} N·m", tq.input);
    println!("  Friction:        {:>12.3} N·m", tq.friction);
    println!("  Drag:            {:>12.3} N·m", tq.drag);
    println!("  Vegetation:      {:>12.3} N·m", tq.vegetation);
    println!("  Net:             {:>12.3} N·m", tq.net);
    println!("Performance:");
    println!("  Energy in:       {:>12.3} J", m.energy_total);
    println!("  Energy useful:   {:>12.3} J", m.energy_useful);
    println!("  Efficiency:      {:>12.2} %", m.efficiency * 100.0);
    println!("  Power avg:       {:>12.3} W", m.power_avg);
    println!("  ω stability:     {:>12.4}", m.omega_stability);
    println!("  Area cut:        {:>12.3} m²", m.area_cut);
    println!("  Settling time:   {:>12.3} s", m.settling_time);
    println!("  Overshoot:       {:>12.2} %", m.overshoot);
    println!("  Dominant freq:   {:>12.3} Hz", m.dominant_frequency);
}

fn write_csv(traj: &Trajectory, path: &Path) -> CliResult<()> {
    let io_err = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut w = BufWriter::new(file);
    writeln!(w, "time,theta,omega,torque,power,kinetic_energy").map_err(io_err)?;
    for i in 0..traj.len() {
        writeln!(
            w,
            "{},{},{},{},{},{}",
            traj.time[i],
            traj.theta[i],
            traj.omega[i],
            traj.torque[i],
            traj.power[i],
            traj.kinetic_energy[i]
        )
        .map_err(io_err)?;
    }
    w.flush().map_err(io_err)
}

fn cmd_compare(paths: &[PathBuf], metrics: &[MetricKey], json: bool) -> CliResult<()> {
    let (ready, rejected) = prepare_all(paths);
    for (path, e) in &rejected {
        eprintln!("✗ {} invalid: {}", path.display(), e);
    }
    let cases: Vec<BatchCase> = ready.into_iter().map(BatchCase::from).collect();

    let outcomes = simulate_batch(&cases);
    let mut entries = Vec::with_capacity(outcomes.len());
    for outcome in &outcomes {
        match outcome.trajectory() {
            Some(traj) => entries.push((outcome.name.clone(), analyze(traj))),
            None => {
                let reason = match &outcome.result {
                    Ok(traj) => traj.message.clone(),
                    Err(e) => e.to_string(),
                };
                eprintln!("✗ {} skipped: {}", outcome.name, reason);
            }
        }
    }

    let report = compare(&entries, metrics)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Compared {} of {} runs", entries.len(), paths.len());
    for ranking in &report.rankings {
        println!("{}:", ranking.metric);
        for entry in &ranking.entries {
            println!("  {:>2}. {:<24} {:>14.6}", entry.rank, entry.name, entry.value);
        }
    }
    println!("Pareto set (efficiency vs average power):");
    for name in &report.pareto {
        println!("  {name}");
    }
    println!("Sensitivity:");
    for s in &report.sensitivity {
        println!(
            "  {:<20} mean {:>12.4}  std {:>12.4}  cv {:>8.4}",
            s.metric.name(),
            s.mean,
            s.std,
            s.coefficient_of_variation
        );
    }
    Ok(())
}
