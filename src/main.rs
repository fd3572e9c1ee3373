use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use price_pivot::{config, Analysis, MixedDimensions, PricePivot, PricePivotError, UnparsedPeriods};

#[derive(Parser)]
#[command(name = "price-pivot", version, about = "Pivot WIDTH/OLD PRICE workbooks by date")]
struct Cli {
    /// Placement of DATE labels that are not recognizable dates.
    #[arg(long, value_enum, global = true, default_value_t = UnparsedPeriods::First)]
    unparsed_periods: UnparsedPeriods,

    /// Whether numeric and text WIDTH values may be pivoted together.
    #[arg(long, value_enum, global = true, default_value_t = MixedDimensions::Collate)]
    mixed_dimensions: MixedDimensions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the multi-sheet pivot report workbook.
    Report {
        input: PathBuf,
        #[arg(short, long, default_value = config::REPORT_FILE_NAME)]
        output: PathBuf,
    },
    /// Render a bar chart of the latest date's mean price per WIDTH.
    Visualize {
        input: PathBuf,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print the latest date's mean price per WIDTH.
    Table {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let pivot = PricePivot::builder()
        .unparsed_periods(cli.unparsed_periods)
        .mixed_dimensions(cli.mixed_dimensions)
        .build();

    match run(&pivot, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_no_data() => {
            println!("{}", e);
            ExitCode::SUCCESS
        }
        Err(e) if e.is_input_rejection() => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(pivot: &PricePivot, command: Command) -> Result<(), PricePivotError> {
    match command {
        Command::Report { input, output } => {
            let analysis = pivot.analyze_path(&input)?;
            analysis.report().save(&output)?;
            println!("{}", output.display());
        }
        Command::Visualize { input, out_dir } => {
            let analysis = pivot.analyze_path(&input)?;
            let dir = out_dir.unwrap_or_else(config::default_artifact_dir);
            let chart = analysis.render_chart(&dir)?;
            println!("{}\t{}", chart.period, chart.path.display());
        }
        Command::Table { input, json } => {
            let analysis: Analysis = pivot.analyze_path(&input)?;
            let table = analysis.table();
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                print!("{}", table.render_text());
            }
        }
    }
    Ok(())
}
