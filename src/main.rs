use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use foam_forces::{
    Component, Config, ForceMap, ForceType, Forces, Kernel, MeanStd, TimeRange,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// Force file or case directory with numbered restart directories.
    #[arg(long)]
    input: PathBuf,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report loading progress.
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct RangeArgs {
    /// Start of the time window (0 for the first sample).
    #[arg(long, default_value_t = 0.0)]
    start_time: f64,

    /// End of the time window (0 for the last sample).
    #[arg(long, default_value_t = 0.0)]
    end_time: f64,
}

impl RangeArgs {
    fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    Summary,

    Average {
        #[command(flatten)]
        range: RangeArgs,
    },

    Filter {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long, default_value_t = 11)]
        window: usize,

        #[arg(long, value_enum, default_value_t = Kernel::Flat)]
        kernel: Kernel,

        /// Start of the statistics window on the filtered series.
        #[arg(long, default_value_t = 0.0)]
        stats_start_time: f64,

        /// End of the statistics window on the filtered series.
        #[arg(long, default_value_t = 0.0)]
        stats_end_time: f64,
    },

    Coefficients {
        #[command(flatten)]
        range: RangeArgs,
    },

    Series {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long, value_enum, default_value_t = ForceType::Total)]
        force_type: ForceType,

        #[arg(long, value_enum, default_value_t = Component::X)]
        component: Component,
    },
}

#[derive(Debug, Serialize)]
struct SummaryReport {
    n_records: usize,
    min_time: Option<f64>,
    max_time: Option<f64>,
}

#[derive(Debug, Serialize)]
struct StatsReport {
    start_time: f64,
    end_time: f64,
    forces: ForceMap<MeanStd>,
}

#[derive(Debug, Serialize)]
struct FilterReport {
    window: usize,
    kernel: Kernel,
    n_samples: usize,
    stats: StatsReport,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::debug!("{args:#?}");

    let mut cfg = match &args.config {
        Some(file) => Config::from_file(file).context("failed to construct cfg")?,
        None => Config::default(),
    };
    cfg.analysis.verbose |= args.verbose;
    log::debug!("{cfg:#?}");

    let mut forces =
        Forces::load(&args.input, &cfg.analysis).context("failed to load forces")?;

    match args.command {
        Command::Summary => print_toml(&SummaryReport {
            n_records: forces.series().len(),
            min_time: forces.min_time(),
            max_time: forces.max_time(),
        })?,
        Command::Average { range } => {
            let averages = forces
                .calculate_averages_std(range.range())
                .context("failed to calculate averages")?;
            print_toml(&stats_report(range.range(), averages))?;
        }
        Command::Filter {
            range,
            window,
            kernel,
            stats_start_time,
            stats_end_time,
        } => {
            let n_samples = forces
                .filter_forces(range.range(), window, kernel)
                .context("failed to filter forces")?
                .table
                .len();
            let stats_range = TimeRange::new(stats_start_time, stats_end_time);
            let averages = forces
                .calculate_filtered_averages_std(stats_range)
                .context("failed to calculate filtered averages")?;
            print_toml(&FilterReport {
                window,
                kernel,
                n_samples,
                stats: stats_report(stats_range, averages),
            })?;
        }
        Command::Coefficients { range } => {
            let averages = forces
                .coefficients(&cfg.reference)
                .averages_std(range.range())
                .context("failed to calculate coefficient averages")?;
            print_toml(&stats_report(range.range(), averages))?;
        }
        Command::Series {
            range,
            force_type,
            component,
        } => {
            let time = forces.time_by_time(range.range())?;
            let vals = forces.force_by_time(range.range(), force_type, component)?;
            println!("# time {force_type}.{component}");
            for (t, val) in time.iter().zip(vals) {
                println!("{t} {val}");
            }
        }
    }

    Ok(())
}

fn stats_report(range: TimeRange, forces: ForceMap<MeanStd>) -> StatsReport {
    StatsReport {
        start_time: range.start,
        end_time: range.end,
        forces,
    }
}

fn print_toml<T: Serialize>(report: &T) -> Result<()> {
    let text = toml::to_string_pretty(report).context("failed to serialize report")?;
    print!("{text}");
    Ok(())
}
