use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

use bioreactor::device::HttpReactor;
use bioreactor::{run_batch, BatchConfig, BatchReport, BatchVerdict, SimulatedReactor, StepTag};

#[derive(Parser)]
#[command(name = "bioreactor")]
#[command(about = "Batch process sequencer for a remote bioreactor", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one batch and print the acceptance report
    Run {
        /// Base URL of the mini-MES service
        #[arg(long, default_value = HttpReactor::DEFAULT_HOST)]
        host: String,

        /// Path to a TOML configuration file (defaults apply otherwise)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Run against the in-process simulated reactor instead of the API
        #[arg(long)]
        simulate: bool,

        /// Emit the report as JSON instead of the console rendering
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            host,
            config,
            simulate,
            json,
        } => run(&host, config.as_deref(), simulate, json),
    }
}

fn run(host: &str, config_path: Option<&std::path::Path>, simulate: bool, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => BatchConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BatchConfig::default(),
    };

    let report = if simulate {
        let mut device = SimulatedReactor::new();
        println!("Starting reaction in the simulated reactor");
        run_batch(&mut device, &config, print_transition)
    } else {
        let mut device = HttpReactor::connect(host)
            .with_context(|| format!("failed to connect to the reactor API at {host}"))?;
        println!("Starting reaction in reactor {}", device.reactor_id());
        run_batch(&mut device, &config, print_transition)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_transition(step: StepTag, elapsed: Duration) {
    println!("T={:.2}s  process state = {step}", elapsed.as_secs_f64());
}

fn print_report(report: &BatchReport) {
    println!("\n---------- Final Report ----------");
    println!("batch {}", report.batch_id);

    for entry in &report.entries {
        let marker = if entry.passed {
            "PASS".green()
        } else {
            "FAIL".red()
        };
        println!("[{marker}] {:<28} {}", entry.check, entry.message);
    }

    if let Some(abort) = &report.abort {
        println!("{} {abort}", "aborted:".red().bold());
    }

    let verdict = match report.verdict {
        BatchVerdict::Success => "SUCCESS".green().bold(),
        BatchVerdict::Failed => "FAILED".red().bold(),
    };
    println!("The overall status of this batch is: {verdict}");
}
