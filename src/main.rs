use clap::Parser;
use lean_waste::dataset::Dataset;
use lean_waste::{analysis, config, display, report};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "lean-waste")]
#[command(about = "Classify production-line measurements into Lean waste and rank remediation priorities")]
#[command(version)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Input CSV (overrides [input].path)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Workbook output path (overrides [report].path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON summary output path (overrides [report].summary_path)
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Do not print tables to the console
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(level: Level) {
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_from_path(&cli.config)?;
    init_tracing(config.log_level());
    tracing::info!(
        config_path = %cli.config.display(),
        app = %config.app.name,
        "lean-waste starting"
    );

    let input = cli
        .input
        .unwrap_or_else(|| config.input_path().to_path_buf());
    let output = cli
        .output
        .unwrap_or_else(|| config.report_path().to_path_buf());
    let summary = cli
        .summary
        .or_else(|| config.summary_path().map(|path| path.to_path_buf()));

    let dataset = match Dataset::load_csv(&input) {
        Ok(dataset) => dataset,
        Err(err) => {
            tracing::error!(path = %input.display(), error = %err, "Failed to load dataset");
            return Err(err.into());
        }
    };

    let analysis = analysis::analyze(dataset);
    let tables = report::generate(&analysis, &output)?;

    if !cli.quiet {
        display::print_report(&tables);
    }

    if let Some(path) = summary {
        report::summary::write_summary(&analysis, &path)?;
    }

    if analysis.no_waste_detected() {
        tracing::info!("Report contains no waste categories; chart omitted");
    }
    println!("\nExcel report generated successfully: {}", output.display());
    Ok(())
}
