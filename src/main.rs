//! Symbiosis Core - demo binary
//!
//! Seeds (or loads) a marketplace, ranks matches for every open request,
//! connects the acting party's request to its best offer, walks that
//! exchange through its lifecycle and prints the manifest export and
//! impact summary.

use std::io;
use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::info;

use symbiosis_core::report::csv::write_manifests;
use symbiosis_core::sample::{self, HOME_COMPANY};
use symbiosis_core::types::quantity::format_grouped;
use symbiosis_core::{Config, Direction, ImpactSummary, ManifestStatus, Snapshot};

#[derive(Parser)]
#[command(name = "symbiosis-core")]
#[command(about = "Deterministic matching and manifest ledger for industrial symbiosis")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "symbiosis.toml")]
    config: PathBuf,

    /// Snapshot to load from and save to (seed data is used if it is missing)
    #[arg(short, long, env = "SYMBIOSIS_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Matches to show per request (overrides config file)
    #[arg(long)]
    limit: Option<usize>,

    /// Party the demo acts as
    #[arg(long, default_value = HOME_COMPANY)]
    party: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symbiosis_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;
    info!(config = %cli.config.display(), "configuration loaded");

    let engine = config.matching_engine()?;
    let limit = cli.limit.unwrap_or(config.matching.default_limit);

    let (mut listings, mut ledger) = match &cli.snapshot {
        Some(path) if path.exists() => Snapshot::load(path)?.into_parts(config.estimator()?)?,
        _ => {
            info!("no snapshot found, seeding sample marketplace");
            let mut ledger = config.ledger()?;
            sample::seed_manifests(&mut ledger)?;
            (sample::listings()?, ledger)
        }
    };

    let has_request = listings
        .iter()
        .any(|l| l.owner_id == cli.party && l.direction == Direction::Request);
    if !has_request {
        info!(party = %cli.party, "no open request for party, posting one");
        listings.push(sample::request_for(&cli.party)?);
    }

    println!("===========================================");
    println!("  Symbiosis Core - Matchmaking");
    println!("===========================================");

    let mut best_offer = None;
    for request in listings.iter().filter(|l| l.direction == Direction::Request) {
        println!();
        println!(
            "{} needs {} of {} in {}",
            request.company_name,
            request.quantity_label(),
            request.material,
            request.location
        );
        let matches = engine.find_matches(request, &listings, limit)?;
        if matches.is_empty() {
            println!("  (no compatible offers)");
        }
        for m in &matches {
            println!("  [{:>3}] {} - {}", m.score, m.listing_id, m.reason);
            println!(
                "        Est. {}{} potential benefit",
                config.impact.currency_symbol,
                format_grouped(m.potential_benefit)
            );
        }
        if best_offer.is_none() && request.owner_id == cli.party {
            best_offer = matches.first().map(|m| m.listing_id.clone());
        }
    }

    if let Some(offer) = best_offer.and_then(|id| listings.iter().find(|l| l.id == id)) {
        println!();
        println!("{} connects to {} ({})", cli.party, offer.company_name, offer.id);
        let manifest = ledger.connect(offer, &cli.party)?;
        ledger.transition(&manifest.id, &offer.owner_id, ManifestStatus::InTransit)?;
        let done = ledger.transition(&manifest.id, &cli.party, ManifestStatus::Completed)?;
        println!(
            "  Manifest {} {} - {} kg CO2 saved",
            done.id, done.status, done.carbon_saved_kg
        );
    }

    let manifests = ledger.list(None);
    println!();
    println!("--- Manifests ---");
    write_manifests(&manifests, io::stdout().lock())?;

    let summary = ImpactSummary::from_manifests(&manifests, config.impact.savings_rate_per_kg);
    println!();
    println!("--- Impact ---");
    println!("{}", summary.narrative(&config.impact.currency_symbol));

    let receipt = ledger.receipt(Utc::now())?;
    if let Some(rate) = receipt.settlement_rate() {
        println!(
            "Settled: {} of {} manifests ({}%)",
            receipt.settled_count,
            receipt.manifest_count,
            (rate * Decimal::ONE_HUNDRED).round_dp(1)
        );
    }
    println!("Ledger digest: {}", receipt.state_root_hex());

    if let Some(path) = &cli.snapshot {
        Snapshot::capture(&listings, &ledger).save(path)?;
    }

    Ok(())
}
