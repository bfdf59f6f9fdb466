use clap::{Parser, ValueEnum};
use harness::presentation::{write_banner, write_unsupported, write_usage};
use harness::{
    ConsoleReporter, DefaultRunner, HarnessError, NoopObserver, SimulationConfig, TestRunner,
};
use serde_json::json;
use std::io::{self, Write};
use tracing::info;

const PROGRAM_NAME: &str = "pump-test-factory";

#[derive(Parser)]
#[command(name = PROGRAM_NAME)]
#[command(about = "Simulated acceptance tests for pumps, compressors and valves")]
struct Cli {
    /// Equipment type: pump, compressor or valve
    equipment_type: Option<String>,
    /// Operation: opened, close, start, stop or test
    operation: Option<String>,
    /// Seed for the random source, to reproduce a previous run
    #[arg(long)]
    seed: Option<u64>,
    /// Do not wait out instrument settle delays
    #[arg(long)]
    fast: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    let (equipment_type, operation) = match (cli.equipment_type, cli.operation) {
        (Some(equipment_type), Some(operation)) => (equipment_type, operation),
        _ => {
            write_banner(&mut stdout)?;
            write_usage(&mut stdout, PROGRAM_NAME)?;
            return Ok(());
        }
    };

    let mut config = SimulationConfig::new().with_fast_mode(cli.fast);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let mut runner = TestRunner::from_config(&config)?;
    info!("Runner ready (seed {:?}, fast {})", runner.seed(), config.fast);

    match cli.format {
        OutputFormat::Text => run_text(&mut runner, &equipment_type, &operation, stdout),
        OutputFormat::Json => run_json(&mut runner, &equipment_type, &operation, stdout),
    }
}

fn run_text<W: Write>(
    runner: &mut DefaultRunner,
    equipment_type: &str,
    operation: &str,
    mut out: W,
) -> Result<(), Box<dyn std::error::Error>> {
    write_banner(&mut out)?;
    writeln!(
        out,
        "Initializing {} for operation: {}",
        equipment_type.to_lowercase(),
        operation.to_lowercase()
    )?;
    writeln!(out)?;

    let mut reporter = ConsoleReporter::new(out);
    match runner.run(equipment_type, operation, &mut reporter) {
        Ok(report) => {
            reporter.finish(&report)?;
            Ok(())
        }
        Err(HarnessError::Catalog(e)) => {
            // unsupported pairs are reported, not fatal
            let mut out = reporter.into_inner()?;
            write_unsupported(&mut out, &e.to_string())?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn run_json<W: Write>(
    runner: &mut DefaultRunner,
    equipment_type: &str,
    operation: &str,
    mut out: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = match runner.run(equipment_type, operation, &mut NoopObserver) {
        Ok(report) => serde_json::to_value(&report).map_err(HarnessError::from)?,
        Err(HarnessError::Catalog(e)) => json!({ "error": e.to_string() }),
        Err(e) => return Err(e.into()),
    };

    serde_json::to_writer_pretty(&mut out, &document)?;
    writeln!(out)?;
    Ok(())
}
