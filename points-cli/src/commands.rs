//! Command handlers

use points_api::{run_server, shutdown_signal};
use points_core::{score as score_receipt, PointsBreakdown, Receipt};
use points_store::open_store;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::config::ServeConfig;
use crate::error::{CliError, CliResult};

/// Open the store, serve until shutdown, then close the store
pub async fn serve(config: ServeConfig) -> CliResult<()> {
    let store = open_store(&config.store).await?;

    let served = run_server(&config.api, store.clone(), shutdown_signal())
        .await
        .map_err(|e| CliError::server(e.to_string()));

    if let Err(e) = store.close().await {
        tracing::error!(error = %e, "Failed to close receipt store");
    } else {
        tracing::info!(backend = store.backend_name(), "Receipt store closed");
    }

    served
}

/// Score a receipt file and print the result
pub fn score(file: &Path, json: bool) -> CliResult<()> {
    let contents = fs::read_to_string(file)?;
    let receipt = Receipt::from_json(&contents)?;
    let breakdown = score_receipt(&receipt);

    if json {
        println!("{}", serde_json::to_string_pretty(&ScoreOutput::new(&breakdown))?);
    } else {
        print!("{}", render_breakdown(&receipt, &breakdown));
    }

    Ok(())
}

#[derive(serde::Serialize)]
struct ScoreOutput<'a> {
    #[serde(flatten)]
    breakdown: &'a PointsBreakdown,
    total: u64,
}

impl<'a> ScoreOutput<'a> {
    fn new(breakdown: &'a PointsBreakdown) -> Self {
        Self {
            breakdown,
            total: breakdown.total(),
        }
    }
}

fn render_breakdown(receipt: &Receipt, breakdown: &PointsBreakdown) -> String {
    let rows = [
        ("Retailer name", breakdown.retailer),
        ("Round total", breakdown.round_total),
        ("Quarter total", breakdown.quarter_total),
        ("Item pairs", breakdown.item_pairs),
        ("Item descriptions", breakdown.descriptions),
        ("Odd purchase day", breakdown.odd_day),
        ("Afternoon purchase", breakdown.afternoon),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "Receipt from {}", receipt.retailer);
    for (label, points) in rows {
        let _ = writeln!(out, "  {:<20} {:>6}", label, points);
    }
    let _ = writeln!(out, "  {:<20} {:>6}", "Total", breakdown.total());
    out
}
