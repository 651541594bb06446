use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use render::figures::{coordination_chart, speed_chart, torque_chart};
use std::fs;
use std::path::{Path, PathBuf};
use workflow::config::RunConfig;
use workflow::runner::Runner;

mod render;
mod workflow;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ChartSelection {
    /// Time/current coordination chart of motor and protector
    Coordination,
    /// Speed x current and torque x speed charts
    SpeedTorque,
    All,
}

#[derive(Parser)]
#[command(author, version, about = "Motor protection coordination and speed/torque charts")]
struct Args {
    #[arg(long, value_enum, default_value_t = ChartSelection::All)]
    chart: ChartSelection,
    /// Load run parameters from YAML instead of the reference motor
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Also write each chart's series as JSON
    #[arg(long, default_value_t = false)]
    export_json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = &args.config {
        RunConfig::load(path)?
    } else {
        RunConfig::default()
    };
    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating output directory {}", args.output_dir.display()))?;

    let runner = Runner::new(config);

    if matches!(args.chart, ChartSelection::Coordination | ChartSelection::All) {
        let result = runner.coordination()?;
        let chart = coordination_chart(&result);
        publish(&chart, &args.output_dir, args.export_json)
            .context("rendering coordination chart")?;
    }

    if matches!(args.chart, ChartSelection::SpeedTorque | ChartSelection::All) {
        let curves = runner.speed_torque()?;
        println!(
            "Rated torque {:.2} N·m at {} rpm",
            curves.rated_torque,
            runner.config().operating_point.rated_speed_rpm
        );
        publish(&speed_chart(&curves), &args.output_dir, args.export_json)
            .context("rendering speed chart")?;
        publish(&torque_chart(&curves), &args.output_dir, args.export_json)
            .context("rendering torque chart")?;
    }

    let metrics = runner.metrics();
    info!(
        "evaluated {} series / {} samples ({} errors)",
        metrics.series, metrics.samples, metrics.errors
    );

    Ok(())
}

fn publish(chart: &render::ChartSpec, dir: &Path, export_json: bool) -> anyhow::Result<()> {
    for path in render::publish(chart, dir, export_json)? {
        println!("Chart '{}' was written successfully.", path.display());
    }
    Ok(())
}
