//! Bench command: fire identical requests at once and show what the
//! orchestrator did with them.
//!
//! Within a round the requests share one fingerprint, so they collapse onto
//! a single backend call. Later rounds are served from the cache until the
//! entry expires.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use colored::Colorize;
use futures::future::join_all;
use log::debug;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{BenchArgs, CommandContext, OutputFormat};
use crate::models::display::{CacheEntryDisplay, LatencyDisplay};
use crate::output::{Formattable, json};
use storefront::cache::CacheEntrySnapshot;
use storefront::client::{ApiRequest, LatencyStats};
use storefront::Result;

#[derive(Debug, Serialize)]
struct RoundReport {
    round: usize,
    succeeded: usize,
    failed: usize,
    elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct BenchReport {
    path: String,
    concurrency: usize,
    rounds: Vec<RoundReport>,
    latency: BTreeMap<String, LatencyStats>,
    cache: Vec<CacheEntrySnapshot>,
}

/// Run the bench command
pub async fn run(opts: &GlobalOptions, args: &BenchArgs) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let concurrency = args.concurrency.max(1);
    let mut rounds = Vec::with_capacity(args.rounds);

    for round in 1..=args.rounds {
        let started = Instant::now();
        let calls = (0..concurrency).map(|_| ctx.client.fetch(ApiRequest::get(args.path.as_str())));
        let results = join_all(calls).await;
        let elapsed = started.elapsed();

        let failed = results.iter().filter(|r| r.is_err()).count();
        let error = results
            .iter()
            .find_map(|r| r.as_ref().err())
            .map(ToString::to_string);
        debug!("Round {} finished in {:?} ({} failed)", round, elapsed, failed);

        rounds.push(RoundReport {
            round,
            succeeded: results.len() - failed,
            failed,
            elapsed_ms: millis(elapsed),
            error,
        });
    }

    let report = BenchReport {
        path: args.path.clone(),
        concurrency,
        rounds,
        latency: ctx.client.latency_snapshot(),
        cache: ctx.client.cache_snapshot(),
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&report)?),
        OutputFormat::Table => print_report(report)?,
    }
    Ok(())
}

fn print_report(report: BenchReport) -> Result<()> {
    println!(
        "{} x{} per round\n",
        report.path.bold(),
        report.concurrency
    );

    for round in &report.rounds {
        let status = if round.failed == 0 {
            format!("{} ok", round.succeeded).green()
        } else {
            format!("{} failed", round.failed).red()
        };
        println!(
            "Round {}: {} in {:.1}ms",
            round.round, status, round.elapsed_ms
        );
        if let Some(ref error) = round.error {
            println!("  {}", error.dimmed());
        }
    }

    println!("\n{}", "Latency".bold());
    let latency: Vec<LatencyDisplay> = report
        .latency
        .into_iter()
        .map(LatencyDisplay::from)
        .collect();
    latency.print(OutputFormat::Table)?;

    println!("\n{}", "Cache".bold());
    let cache: Vec<CacheEntryDisplay> = report
        .cache
        .into_iter()
        .map(CacheEntryDisplay::from)
        .collect();
    cache.print(OutputFormat::Table)
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
