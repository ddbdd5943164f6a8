//! BuildGuard CLI - PC build compatibility checks from the command line.

use anyhow::Context;
use buildguard::{
    BuildGuardCore, BuildReport, BuildState, Catalog, CompatibilityVerdict, Component,
    EngineConfig, Severity, SlotId, SLOTS,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "buildguard")]
#[command(about = "PC build compatibility checker", long_about = None)]
#[command(version)]
struct Cli {
    /// Engine config file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a build against a catalog
    Check {
        /// Catalog of components (JSON)
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Build file: slot id -> component id or inline component (JSON)
        #[arg(long, value_name = "FILE")]
        build: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if issues found at this severity or higher
        #[arg(long, value_enum)]
        fail_on: Option<FailOnSeverity>,
    },

    /// List selectable components for a slot
    Candidates {
        /// Catalog of components (JSON)
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Slot id (see `buildguard slots`)
        #[arg(long, value_name = "SLOT")]
        slot: String,

        /// Current build to check candidates against
        #[arg(long, value_name = "FILE")]
        build: Option<PathBuf>,

        /// Only list candidates compatible with the build
        #[arg(long)]
        compatible_only: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List build slots
    Slots,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[derive(Clone, ValueEnum)]
enum FailOnSeverity {
    Error,
    Warning,
    Info,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    process::exit(exit_code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    tracing::debug!("Engine config: {:?}", config);

    match cli.command {
        Commands::Check {
            catalog,
            build,
            format,
            fail_on,
        } => handle_check(&catalog, &build, &config, format, fail_on),
        Commands::Candidates {
            catalog,
            slot,
            build,
            compatible_only,
            format,
        } => {
            handle_candidates(&catalog, &slot, build.as_deref(), compatible_only, &config, format)?;
            Ok(0)
        }
        Commands::Slots => {
            handle_slots();
            Ok(0)
        }
    }
}

fn handle_check(
    catalog: &Path,
    build: &Path,
    config: &EngineConfig,
    format: OutputFormat,
    fail_on: Option<FailOnSeverity>,
) -> anyhow::Result<i32> {
    let report = BuildGuardCore::check(catalog, build, config)?;

    match format {
        OutputFormat::Human => output_human(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(severity) = fail_on {
        if should_fail(&report, &severity) {
            return Ok(1);
        }
    }
    Ok(0)
}

fn should_fail(report: &BuildReport, severity: &FailOnSeverity) -> bool {
    match severity {
        FailOnSeverity::Error => report.stats.errors > 0,
        FailOnSeverity::Warning => report.stats.errors > 0 || report.stats.warnings > 0,
        FailOnSeverity::Info => report.status.status == BuildState::Issues,
    }
}

fn output_human(report: &BuildReport) {
    println!("\n{}", report.status.message);
    println!("{}", "─".repeat(60));

    let sections = [
        ("ERRORS", Severity::Error),
        ("WARNINGS", Severity::Warning),
        ("ADVISORIES", Severity::Info),
    ];
    for (title, severity) in sections {
        let issues: Vec<_> = report
            .details
            .iter()
            .filter(|i| i.severity == severity)
            .collect();
        if issues.is_empty() {
            continue;
        }
        println!("\n  {}:", title);
        for issue in issues {
            println!("    - {}", issue.message);
            if let Some(slot) = issue.slot {
                println!("      Slot: {}", slot);
            }
        }
    }

    println!("\n  Summary:");
    println!("    Errors:     {}", report.stats.errors);
    println!("    Warnings:   {}", report.stats.warnings);
    println!("    Advisories: {}", report.stats.info);
    println!("    Total:      ${:.2}", report.total_price);
}

fn handle_candidates(
    catalog_path: &Path,
    slot: &str,
    build: Option<&Path>,
    compatible_only: bool,
    config: &EngineConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let slot: SlotId = slot.parse()?;
    let catalog = Catalog::load(catalog_path)?;
    tracing::debug!(
        "{} {} listing(s) in catalog",
        catalog.of_type(slot.component_type()).count(),
        slot.component_type()
    );
    let candidates = BuildGuardCore::candidates(&catalog, slot, build, compatible_only, config)?;

    match format {
        OutputFormat::Human => output_candidates_human(slot, &candidates),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "slot": slot,
                "candidates": candidates.iter().map(|(component, verdict)| {
                    serde_json::json!({
                        "component": component,
                        "compatible": verdict.compatible,
                        "reasons": verdict.reasons,
                    })
                }).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn output_candidates_human(slot: SlotId, candidates: &[(Component, CompatibilityVerdict)]) {
    println!("\nCandidates for {} ({})", slot.slot().name, slot);
    println!("{}", "─".repeat(60));

    if candidates.is_empty() {
        println!("  No candidates available");
        return;
    }

    for (component, verdict) in candidates {
        let mark = if verdict.compatible { "ok" } else { "!!" };
        println!(
            "  [{}] {} - {} (${:.2}, {} in stock)",
            mark, component.id, component.name, component.price, component.stock
        );
        for reason in &verdict.reasons {
            println!("       {}", reason);
        }
    }
}

fn handle_slots() {
    println!("Build slots:\n");
    for slot in SLOTS.iter() {
        match slot.sub_type {
            Some(sub_type) => println!(
                "  {:<12} {} [{} / {}]",
                slot.id.as_str(),
                slot.name,
                slot.component_type,
                sub_type
            ),
            None => println!(
                "  {:<12} {} [{}]",
                slot.id.as_str(),
                slot.name,
                slot.component_type
            ),
        }
    }
}
