use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tile_baker::bake::{self, BakeOutcome, CheckOutcome};
use tile_baker::config::{self, DEFAULT_CONFIG_FILE, TileConfig};
use tile_baker::launcher::SystemLauncher;
use tile_baker::output;
use tracing_subscriber::EnvFilter;

/// Exit status when the input folder does not hold one image per cell.
const EXIT_COUNT_MISMATCH: u8 = 2;

#[derive(clap::Args, Clone)]
struct BakeArgs {
    /// Do not open the finished tile in the default viewer
    #[arg(long)]
    no_open: bool,
}

#[derive(Parser)]
#[command(name = "tile-baker")]
#[command(about = "Bake a grid of photographs into one date-stamped tile")]
#[command(long_about = "\
Bake a grid of photographs into one date-stamped tile

Every JPEG directly inside the input folder is placed on the grid, one per
cell. Files are taken in file-name order and fill the grid left to right,
top to bottom:

  img_in/                  5x2 grid (default)
  ├── 01.jpg               01 02 03 04 05
  ├── 02.jpg               06 07 08 09 10
  ├── ...
  └── 10.jpg

Each photo is scaled so its height fills the cell, then cropped around its
horizontal center. Photos too narrow for their cell are flagged; crop them
by hand and run again.

Output (the name carries today's date; same-day runs replace it):

  img_out/
  ├── 20261017__department_tile.jpg
  └── 20261017__department_tile--SMALL.jpg

Exit status: 0 on success, 1 on error, 2 when the number of images does not
match the grid (nothing is written).

Run 'tile-baker gen-config' to generate a documented tile.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file means stock defaults)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Input folder, overrides `input_dir`
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Output folder, overrides `output_dir`
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose the tile, write both JPEGs and open the result
    Bake(BakeArgs),
    /// Validate the input folder and preview each cell's fit without writing
    Check,
    /// Print a stock tile.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Command::Bake(args) => {
            let mut config = resolve_config(&cli)?;
            if args.no_open {
                config.output.open_viewer = false;
            }
            output::print_preamble(&config);

            let launcher = SystemLauncher::new();
            match bake::bake(&config, &launcher, output::print_bake_event)? {
                BakeOutcome::Completed(report) => output::print_finished(&report.paths.high_res),
                BakeOutcome::CountMismatch(mismatch) => {
                    output::print_count_mismatch(&mismatch);
                    return Ok(ExitCode::from(EXIT_COUNT_MISMATCH));
                }
            }
        }
        Command::Check => {
            let config = resolve_config(&cli)?;
            println!("==> Checking {}", config.input_dir.display());
            let outcome = bake::check(&config)?;
            output::print_check_output(&outcome);
            if let CheckOutcome::CountMismatch(_) = outcome {
                return Ok(ExitCode::from(EXIT_COUNT_MISMATCH));
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Config file, then command line folder overrides.
fn resolve_config(cli: &Cli) -> Result<TileConfig, config::ConfigError> {
    let mut config = config::load_config(&cli.config)?;
    if let Some(input) = &cli.input {
        config.input_dir = input.clone();
    }
    if let Some(output) = &cli.output {
        config.output_dir = output.clone();
    }
    Ok(config)
}
