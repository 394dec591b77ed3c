//! Plan command implementation.
//!
//! Shows how a pool splits across every shard so operators can check the
//! balance before handing shards out.

use anyhow::Result;
use serde::Serialize;

use crate::cli::PlanArgs;
use crate::config::Config;
use crate::error::ShardError;
use crate::fs_abstraction::{real_fs, FileSystem};
use crate::pipeline::{self, Pool};
use crate::shard::{ShardSpec, Sharder};
use crate::utils::format_count_with_separator;

/// Partition summary
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PlanReport {
    pub seed: i64,
    pub loaded: usize,
    pub excluded: usize,
    pub skipped_lines: usize,
    pub shards: Vec<ShardSize>,
}

/// Size of a single shard
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ShardSize {
    pub shard: String,
    pub addresses: usize,
}

/// Run the plan command
pub fn run(args: &PlanArgs, config: &Config) -> Result<()> {
    let report = build_report(real_fs(), args, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

pub fn build_report<F: FileSystem + ?Sized>(
    fs: &F,
    args: &PlanArgs,
    config: &Config,
) -> Result<PlanReport, ShardError> {
    // Validates the shard count the same way a descriptor would be
    let total = ShardSpec::new(1, args.shards)?.total();
    let seed = config.resolve_seed(args.pool.seed)?;

    let pool = pipeline::prepare(fs, &super::pool_source(&args.pool, config))?;
    Ok(report_for(seed, total, pool))
}

fn report_for(seed: i64, total: usize, pool: Pool) -> PlanReport {
    let loaded = pool.loaded;
    let excluded = pool.excluded();
    let skipped_lines = pool.skipped_lines;

    let shards = Sharder::new(seed)
        .partition(pool.addresses, total)
        .iter()
        .enumerate()
        .map(|(i, shard)| ShardSize {
            shard: format!("{}/{}", i + 1, total),
            addresses: shard.len(),
        })
        .collect();

    PlanReport {
        seed,
        loaded,
        excluded,
        skipped_lines,
        shards,
    }
}

fn print_report(report: &PlanReport) {
    let remaining = report.loaded - report.excluded;

    println!();
    println!("Seed:      {}", report.seed);
    println!("Loaded:    {}", format_count_with_separator(report.loaded));
    println!("Excluded:  {}", format_count_with_separator(report.excluded));
    println!("Sharded:   {}", format_count_with_separator(remaining));
    if report.skipped_lines > 0 {
        println!("Skipped:   {} lines", report.skipped_lines);
    }
    println!();
    println!("{:<12} {:>12}", "SHARD", "ADDRESSES");
    println!("{}", "-".repeat(25));
    for shard in &report.shards {
        println!(
            "{:<12} {:>12}",
            shard.shard,
            format_count_with_separator(shard.addresses)
        );
    }
    println!();
}
