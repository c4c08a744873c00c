use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for membus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint, then run every test suite
    Ci,
    /// Run one or more test suites (all of them by default)
    Test {
        #[arg(value_enum)]
        suites: Vec<Suite>,
    },
    /// Run the bus benchmarks
    Bench {
        /// Only run benchmarks whose name contains this string
        filter: Option<String>,
    },
}

/// Test targets of the membus crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Suite {
    /// `core::memory` unit tests (ROM, RAM, regions, map)
    Memory,
    /// `core::stack` unit tests
    Stack,
    /// `core::config` layout tests
    Config,
    /// `tests/integration_test.rs`
    Integration,
    /// `tests/properties.rs`
    Properties,
    /// Doc examples
    Doc,
}

impl Suite {
    const ALL: &[Suite] = &[
        Suite::Memory,
        Suite::Stack,
        Suite::Config,
        Suite::Integration,
        Suite::Properties,
        Suite::Doc,
    ];

    fn cargo_args(self) -> Vec<&'static str> {
        let target: &[&'static str] = match self {
            Suite::Memory => &["--lib", "core::memory"],
            Suite::Stack => &["--lib", "core::stack"],
            Suite::Config => &["--lib", "core::config"],
            Suite::Integration => &["--test", "integration_test"],
            Suite::Properties => &["--test", "properties"],
            Suite::Doc => &["--doc"],
        };
        ["test", "-p", "membus"].into_iter().chain(target.iter().copied()).collect()
    }
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Ci => run_ci(),
        Commands::Test { suites } => run_suites(&suites),
        Commands::Bench { filter } => cargo(&bench_args(filter.as_deref())),
    }
}

fn run_ci() -> Result<()> {
    let start = Instant::now();

    cargo(&["fmt", "--all", "--", "--check"])?;
    cargo(&["clippy", "-p", "membus", "--all-targets", "--", "-D", "warnings"])?;
    run_suites(&[])?;

    println!(
        "{} {:.2}s",
        "membus CI passed in".green().bold(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn run_suites(suites: &[Suite]) -> Result<()> {
    let suites = if suites.is_empty() { Suite::ALL } else { suites };

    let mut failed = Vec::new();
    for &suite in suites {
        if cargo(&suite.cargo_args()).is_err() {
            failed.push(suite);
        }
    }

    if !failed.is_empty() {
        bail!("failing suites: {:?}", failed);
    }
    Ok(())
}

fn bench_args(filter: Option<&str>) -> Vec<&str> {
    let mut args = vec!["bench", "-p", "membus", "--bench", "bus_bench"];
    if let Some(filter) = filter {
        args.extend(["--", filter]);
    }
    args
}

fn cargo(args: &[&str]) -> Result<()> {
    println!("{} cargo {}", "→".blue(), args.join(" ").bold());

    let status = Command::new("cargo")
        .args(args)
        .status()
        .context("failed to spawn cargo")?;

    if !status.success() {
        println!("{} cargo {}", "✗".red().bold(), args.join(" "));
        bail!("cargo {} exited with {}", args[0], status);
    }
    Ok(())
}
