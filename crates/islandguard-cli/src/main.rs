// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use chrono::{Duration, Utc};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use islandguard_advisory::{
    build_prompt, offline_advisory, AdvisoryClient, AdvisoryContext, HttpAdvisoryClient,
};
use islandguard_alerts::{aggregate, AlertStore, JsonFileStore, StoreError};
use islandguard_core::{
    resolve_config_path, resolve_data_dir, ConfigPathScope, ExitCode, MachineError,
    ENV_ISLANDGUARD_LOG_LEVEL,
};
use islandguard_ingest::{ingest_dataset, IngestError, IngestErrorCode, IngestOptions};
use islandguard_model::{Alert, AlertStatus, GeoPoint, RegionId, ScoredRegion};
use islandguard_score::{simulate_cyclone, summarize};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode as ProcessExitCode;
use tracing_subscriber::EnvFilter;

const ISLANDGUARD_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "islandguard")]
#[command(version)]
#[command(about = "Mauritius climate-resilience scoring CLI")]
#[command(help_template = ISLANDGUARD_HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  ISLANDGUARD_LOG_LEVEL     Log verbosity override\n  ISLANDGUARD_DATA_DIR      Session data directory\n  ISLANDGUARD_ADVISORY_URL  Generative advisory endpoint\n  ISLANDGUARD_ADVISORY_KEY  Advisory API key"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate, merge and score a region dataset
    Score {
        #[arg(long)]
        regions: PathBuf,
        #[arg(long)]
        scores: PathBuf,
        /// Persist the scored table (canonical JSON + sha256) here
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Run a cyclone what-if scenario over the scored table
    Simulate {
        #[arg(long)]
        regions: PathBuf,
        #[arg(long)]
        scores: PathBuf,
        #[arg(long)]
        intensity: f64,
    },
    /// Whole-table summary statistics
    Summary {
        #[arg(long)]
        regions: PathBuf,
        #[arg(long)]
        scores: PathBuf,
    },
    /// Citizen alert store operations
    Alerts {
        #[command(subcommand)]
        command: AlertsCommand,
    },
    /// Advisory text for one region
    Advise {
        #[arg(long)]
        regions: PathBuf,
        #[arg(long)]
        scores: PathBuf,
        #[arg(long)]
        region: String,
        #[arg(long, default_value_t = 0.0)]
        intensity: f64,
        /// Skip the remote service and print the offline advisory
        #[arg(long, default_value_t = false)]
        offline: bool,
        /// Fail instead of degrading when the remote service is unavailable
        #[arg(long, default_value_t = false)]
        require_remote: bool,
    },
    /// Print resolved paths and environment
    Config,
}

#[derive(Subcommand)]
enum AlertsCommand {
    Submit {
        #[arg(long)]
        store: Option<PathBuf>,
        #[arg(long)]
        region: String,
        #[arg(long, value_enum)]
        status: StatusCli,
        #[arg(long, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, requires = "lat")]
        lon: Option<f64>,
    },
    Summary {
        #[arg(long)]
        store: Option<PathBuf>,
        #[arg(long)]
        regions: PathBuf,
        #[arg(long)]
        scores: PathBuf,
    },
    /// Drop alerts older than the given age
    Prune {
        #[arg(long)]
        store: Option<PathBuf>,
        #[arg(long, default_value_t = 24)]
        hours: i64,
    },
    /// Empty the alert store
    Clear {
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusCli {
    Danger,
    Safe,
}

impl From<StatusCli> for AlertStatus {
    fn from(value: StatusCli) -> Self {
        match value {
            StatusCli::Danger => Self::InDanger,
            StatusCli::Safe => Self::Safe,
        }
    }
}

struct CliFailure {
    exit: ExitCode,
    error: MachineError,
}

impl CliFailure {
    fn new(exit: ExitCode, error: MachineError) -> Self {
        Self { exit, error }
    }
}

impl From<IngestError> for CliFailure {
    fn from(value: IngestError) -> Self {
        let exit = match value.code {
            IngestErrorCode::Schema | IngestErrorCode::Decode => ExitCode::Validation,
            IngestErrorCode::Io => ExitCode::DependencyFailure,
            IngestErrorCode::Internal => ExitCode::Internal,
        };
        Self::new(exit, MachineError::new(value.code.as_str(), &value.message))
    }
}

impl From<StoreError> for CliFailure {
    fn from(value: StoreError) -> Self {
        Self::new(
            ExitCode::DependencyFailure,
            MachineError::new(value.code.as_str(), &value.message),
        )
    }
}

impl From<serde_json::Error> for CliFailure {
    fn from(value: serde_json::Error) -> Self {
        Self::new(
            ExitCode::Internal,
            MachineError::new("internal_error", &value.to_string()),
        )
    }
}

fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(failure) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&failure.error)
                        .unwrap_or_else(|_| failure.error.to_string())
                );
            } else if !cli.quiet {
                eprintln!("error: {}", failure.error);
            }
            ProcessExitCode::from(failure.exit as u8)
        }
    }
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_env(ENV_ISLANDGUARD_LOG_LEVEL)
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<(), CliFailure> {
    match &cli.command {
        Commands::Score {
            regions,
            scores,
            out,
        } => cmd_score(cli, regions, scores, out.as_deref()),
        Commands::Simulate {
            regions,
            scores,
            intensity,
        } => cmd_simulate(cli, regions, scores, *intensity),
        Commands::Summary { regions, scores } => cmd_summary(cli, regions, scores),
        Commands::Alerts { command } => match command {
            AlertsCommand::Submit {
                store,
                region,
                status,
                lat,
                lon,
            } => cmd_alerts_submit(cli, store.as_deref(), region, *status, *lat, *lon),
            AlertsCommand::Summary {
                store,
                regions,
                scores,
            } => cmd_alerts_summary(cli, store.as_deref(), regions, scores),
            AlertsCommand::Prune { store, hours } => cmd_alerts_prune(cli, store.as_deref(), *hours),
            AlertsCommand::Clear { store } => cmd_alerts_clear(cli, store.as_deref()),
        },
        Commands::Advise {
            regions,
            scores,
            region,
            intensity,
            offline,
            require_remote,
        } => cmd_advise(cli, regions, scores, region, *intensity, *offline, *require_remote),
        Commands::Config => cmd_config(cli),
    }
}

fn ingest(regions: &Path, scores: &Path, out: Option<&Path>) -> Result<islandguard_ingest::IngestResult, CliFailure> {
    let opts = IngestOptions {
        geojson_path: regions.to_path_buf(),
        scores_path: scores.to_path_buf(),
        output_root: out.map(Path::to_path_buf),
    };
    tracing::info!(
        regions = %opts.geojson_path.display(),
        scores = %opts.scores_path.display(),
        "running ingest pipeline"
    );
    Ok(ingest_dataset(&opts)?)
}

fn region_row_json(scored: &ScoredRegion) -> Value {
    json!({
        "region_id": scored.region.region_id.as_str(),
        "region_name": scored.region.region_name.as_str(),
        "feature_id": scored.region.feature_id,
        "position": scored.region.position,
        "exposure": scored.region.exposure,
        "vulnerability": scored.region.vulnerability,
        "adaptation": scored.region.adaptation,
        "population": scored.region.population,
        "risk_composite": scored.score.risk_composite,
        "resilience_index": scored.score.resilience_index,
        "category": scored.score.category.as_str(),
        "color": scored.score.category.color(),
    })
}

fn print_region_table(regions: &[ScoredRegion]) {
    for scored in regions {
        println!(
            "{:<10} {:<24} E={:<7.2} V={:<7.2} A={:<7.2} risk={:<8.2} index={:<8.2} {}",
            scored.region.region_id,
            scored.region.region_name,
            scored.region.exposure,
            scored.region.vulnerability,
            scored.region.adaptation,
            scored.score.risk_composite,
            scored.score.resilience_index,
            scored.score.category
        );
    }
}

fn cmd_score(
    cli: &Cli,
    regions: &Path,
    scores: &Path,
    out: Option<&Path>,
) -> Result<(), CliFailure> {
    let result = ingest(regions, scores, out)?;

    if cli.json {
        let payload = json!({
            "feature_count": result.feature_count,
            "row_count": result.row_count,
            "dropped_null_geometries": result.dropped_null_geometries,
            "artifact_path": result.artifact_path,
            "artifact_sha256": result.artifact_sha256,
            "regions": result.regions.iter().map(region_row_json).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if !cli.quiet {
        // Counts first: the positional join cannot detect misordered
        // sources, so integrators self-check against these numbers.
        println!(
            "{} geometry features, {} score rows ({} null geometries dropped)",
            result.feature_count, result.row_count, result.dropped_null_geometries
        );
        print_region_table(&result.regions);
        if let (Some(path), Some(sha256)) = (&result.artifact_path, &result.artifact_sha256) {
            println!("artifact: {} (sha256 {})", path.display(), sha256);
        }
    }
    Ok(())
}

fn cmd_simulate(
    cli: &Cli,
    regions: &Path,
    scores: &Path,
    intensity: f64,
) -> Result<(), CliFailure> {
    let result = ingest(regions, scores, None)?;
    let comparison = simulate_cyclone(&result.regions, intensity);

    if cli.json {
        let rows: Vec<Value> = comparison
            .before
            .iter()
            .zip(&comparison.after)
            .map(|(before, after)| {
                json!({
                    "region_id": before.region.region_id.as_str(),
                    "before": {
                        "exposure": before.region.exposure,
                        "resilience_index": before.score.resilience_index,
                        "category": before.score.category.as_str(),
                    },
                    "after": {
                        "exposure": after.region.exposure,
                        "resilience_index": after.score.resilience_index,
                        "category": after.score.category.as_str(),
                    },
                })
            })
            .collect();
        let payload = json!({ "intensity": intensity, "regions": rows });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if !cli.quiet {
        println!("cyclone intensity {intensity}");
        for (before, after) in comparison.before.iter().zip(&comparison.after) {
            println!(
                "{:<10} index {:>8.2} -> {:>8.2}   {} -> {}",
                before.region.region_id,
                before.score.resilience_index,
                after.score.resilience_index,
                before.score.category,
                after.score.category
            );
        }
    }
    Ok(())
}

fn cmd_summary(cli: &Cli, regions: &Path, scores: &Path) -> Result<(), CliFailure> {
    let result = ingest(regions, scores, None)?;
    let stats = summarize(&result.regions);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else if !cli.quiet {
        println!("{} regions", stats.total_regions);
        for (category, count) in &stats.by_category {
            println!("  {category}: {count}");
        }
        println!("at risk: {}", stats.at_risk_regions);
        if let Some(mean) = stats.mean_resilience_index {
            println!("mean resilience index: {mean:.2}");
        }
        if let Some(population) = stats.population_at_risk {
            println!("population at risk: {population}");
        }
    }
    Ok(())
}

fn store_at(path: Option<&Path>) -> JsonFileStore {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| resolve_data_dir().join("alerts.json"));
    JsonFileStore::new(path)
}

fn cmd_alerts_submit(
    cli: &Cli,
    store: Option<&Path>,
    region: &str,
    status: StatusCli,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<(), CliFailure> {
    let geolocation = match (lat, lon) {
        (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
        _ => None,
    };
    let alert = Alert::new(region, status.into(), Utc::now(), geolocation);
    let store = store_at(store);
    store.append(alert.clone())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&alert)?);
    } else if !cli.quiet {
        println!("recorded {} for {}", alert.status, alert.region_id);
    }
    Ok(())
}

fn cmd_alerts_summary(
    cli: &Cli,
    store: Option<&Path>,
    regions: &Path,
    scores: &Path,
) -> Result<(), CliFailure> {
    let result = ingest(regions, scores, None)?;
    let known: BTreeSet<RegionId> = result
        .regions
        .iter()
        .map(|r| r.region.region_id.clone())
        .collect();
    let alerts = store_at(store).read_all()?;
    let summary = aggregate(&alerts, &known);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !cli.quiet {
        for (region_id, stats) in &summary.per_region {
            println!(
                "{:<10} danger={:<4} safe={:<4} ratio={:.2}",
                region_id, stats.danger_count, stats.safe_count, stats.danger_ratio
            );
        }
        if summary.evacuation.is_empty() {
            println!("no evacuation candidates");
        } else {
            println!("evacuation priority:");
            for entry in &summary.evacuation {
                println!(
                    "  {}. {} ({} danger reports)",
                    entry.priority, entry.region_id, entry.danger_count
                );
            }
        }
        if summary.unknown_region_alerts > 0 {
            println!(
                "{} alert(s) referenced unknown regions and were ignored",
                summary.unknown_region_alerts
            );
        }
    }
    Ok(())
}

fn cmd_alerts_prune(cli: &Cli, store: Option<&Path>, hours: i64) -> Result<(), CliFailure> {
    let cutoff = Utc::now() - Duration::hours(hours);
    let dropped = store_at(store).prune_older_than(cutoff)?;
    if cli.json {
        println!("{}", json!({ "dropped": dropped }));
    } else if !cli.quiet {
        println!("dropped {dropped} alert(s) older than {hours}h");
    }
    Ok(())
}

fn cmd_alerts_clear(cli: &Cli, store: Option<&Path>) -> Result<(), CliFailure> {
    store_at(store).clear()?;
    if cli.json {
        println!("{}", json!({ "cleared": true }));
    } else if !cli.quiet {
        println!("alert store cleared");
    }
    Ok(())
}

fn cmd_advise(
    cli: &Cli,
    regions: &Path,
    scores: &Path,
    region: &str,
    intensity: f64,
    offline: bool,
    require_remote: bool,
) -> Result<(), CliFailure> {
    let result = ingest(regions, scores, None)?;
    let table = if intensity > 0.0 {
        simulate_cyclone(&result.regions, intensity).after
    } else {
        result.regions
    };
    let scored = table
        .iter()
        .find(|r| r.region.region_id.as_str() == region)
        .ok_or_else(|| {
            CliFailure::new(
                ExitCode::Validation,
                MachineError::new("unknown_region", "region not present in the merged table")
                    .with_detail("region_id", region),
            )
        })?;
    let context = AdvisoryContext::from_scored(scored, intensity);

    let (text, degraded) = if offline {
        (offline_advisory(&context), false)
    } else {
        match HttpAdvisoryClient::from_env().and_then(|client| client.advise(&context)) {
            Ok(text) => (text, false),
            Err(err) if require_remote => {
                return Err(CliFailure::new(
                    ExitCode::DependencyFailure,
                    MachineError::new(err.code.as_str(), &err.message),
                ));
            }
            Err(err) => {
                tracing::warn!(error = %err, "advisory service unavailable, degrading to offline message");
                (offline_advisory(&context), true)
            }
        }
    };

    if cli.json {
        let payload = json!({
            "region_id": context.region_id,
            "category": context.category.as_str(),
            "resilience_index": context.resilience_index,
            "degraded": degraded,
            "advisory": text,
            "prompt": build_prompt(&context),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if !cli.quiet {
        println!("{text}");
    }
    Ok(())
}

fn cmd_config(cli: &Cli) -> Result<(), CliFailure> {
    let payload = json!({
        "data_dir": resolve_data_dir(),
        "user_config": resolve_config_path(ConfigPathScope::User),
        "workspace_config": resolve_config_path(ConfigPathScope::Workspace),
    });
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if !cli.quiet {
        println!("data dir:         {}", resolve_data_dir().display());
        println!(
            "user config:      {}",
            resolve_config_path(ConfigPathScope::User).display()
        );
        println!(
            "workspace config: {}",
            resolve_config_path(ConfigPathScope::Workspace).display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::CliFailure;
    use islandguard_core::ExitCode;

    #[test]
    fn serialization_failures_map_to_internal_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{broken").expect_err("parse error");
        let failure = CliFailure::from(err);
        assert_eq!(failure.exit, ExitCode::Internal);
        assert_eq!(failure.error.code, "internal_error");
    }
}
