//! Locate command implementation.

use anyhow::Result;

use crate::cli::LocateArgs;
use crate::config::Config;
use crate::error::ShardError;
use crate::fs_abstraction::{real_fs, FileSystem};
use crate::pipeline;
use crate::shard::{shard_of, ShardSpec, Sharder};

/// Where an address ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Shard indexes (1-based) holding the address; more than one when the
    /// pool contains duplicates
    Assigned { shards: Vec<usize>, total: usize },
    /// Removed by the exclusion list
    Excluded,
    /// Not present in the pool
    Absent,
}

/// Run the locate command
pub fn run(args: &LocateArgs, config: &Config) -> Result<()> {
    let location = locate(real_fs(), args, config)?;

    println!();
    match location {
        Location::Assigned { shards, total } => {
            let names: Vec<String> = shards.iter().map(|x| format!("{}/{}", x, total)).collect();
            println!("{} is assigned to shard {}", args.address, names.join(", "));
        }
        Location::Excluded => println!("{} is EXCLUDED", args.address),
        Location::Absent => println!("{} is NOT in the address pool", args.address),
    }
    println!();

    Ok(())
}

pub fn locate<F: FileSystem + ?Sized>(
    fs: &F,
    args: &LocateArgs,
    config: &Config,
) -> Result<Location, ShardError> {
    let total = ShardSpec::new(1, args.shards)?.total();
    let seed = config.resolve_seed(args.pool.seed)?;
    let address = args.address.trim();

    let pool = pipeline::prepare(fs, &super::pool_source(&args.pool, config))?;

    let mut permuted = pool.addresses;
    Sharder::new(seed).permute(&mut permuted);

    let mut shards: Vec<usize> = permuted
        .iter()
        .enumerate()
        .filter(|(_, addr)| addr.as_str() == address)
        .map(|(position, _)| shard_of(position, total))
        .collect();

    if !shards.is_empty() {
        shards.sort_unstable();
        shards.dedup();
        return Ok(Location::Assigned { shards, total });
    }

    if pool.exclusions.excludes(address) {
        Ok(Location::Excluded)
    } else {
        Ok(Location::Absent)
    }
}
