//! `factoriocalc`: compiles a recipe database plus a demand configuration
//! into a blueprint string.

use clap::Parser;
use factoriocalc_cli::compile;
use factoriocalc_core::InvocationConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "factoriocalc", about = "Compile a recipe demand into a Factorio blueprint")]
struct Args {
    /// Recipe database file.
    #[arg(long)]
    db: PathBuf,

    /// RON file deserializing to an `InvocationConfig` (items, stop_items,
    /// module_priorities, beacon_speed, belt_type, ...).
    #[arg(long)]
    config: PathBuf,

    /// Print the ASCII-art rendering to stderr alongside the blueprint
    /// string.
    #[arg(long)]
    ascii: bool,

    /// Write the blueprint string to this path instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load_config(path: &std::path::Path) -> Result<InvocationConfig, factoriocalc_cli::CompileError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| factoriocalc_cli::CompileError::ConfigFile { path: path.display().to_string(), source })?;
    ron::from_str(&text)
        .map_err(|source| factoriocalc_cli::CompileError::ConfigParse { path: path.display().to_string(), source })
}

fn run() -> Result<(), factoriocalc_cli::CompileError> {
    let args = Args::parse();
    let registry = factoriocalc_data::load_file(&args.db)?;
    let config = load_config(&args.config)?;

    let output = compile(registry, &config)?;

    if args.ascii {
        eprintln!("{}", output.ascii_art);
    }
    tracing::info!(bus_width = output.bus_width, entities = output.entities.len(), "compiled");

    match args.output {
        Some(path) => std::fs::write(&path, &output.blueprint_string)
            .map_err(|source| factoriocalc_cli::CompileError::ConfigFile { path: path.display().to_string(), source })?,
        None => println!("{}", output.blueprint_string),
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
