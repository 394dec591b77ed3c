//! Loading and filtering stages shared by every command.
//!
//! The sharder never sees an unfiltered list: [`prepare`] loads the input,
//! rejects an empty pool, loads the exclusion list and filters, in that order.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::ShardError;
use crate::exclusion::{self, ExclusionSet};
use crate::fs_abstraction::FileSystem;
use crate::loader::{AddressLoader, ListKind};
use crate::utils::plural;

/// Where the pool comes from.
#[derive(Debug, Clone, Default)]
pub struct PoolSource {
    pub input: PathBuf,
    pub exclude: Option<PathBuf>,
    pub max_range_size: Option<u64>,
}

/// Filtered address pool, ready for sharding.
#[derive(Debug, Clone, Default)]
pub struct Pool {
    /// Addresses that survived the exclusion filter, in load order
    pub addresses: Vec<String>,
    pub exclusions: ExclusionSet,
    /// Addresses produced by the loader before filtering
    pub loaded: usize,
    /// Malformed lines dropped from the input and exclusion lists
    pub skipped_lines: usize,
}

impl Pool {
    pub fn excluded(&self) -> usize {
        self.loaded - self.addresses.len()
    }
}

/// Run the loader and exclusion stages.
///
/// # Errors
/// - [`ShardError::InputNotFound`] / [`ShardError::ExcludeNotFound`]
/// - [`ShardError::Load`] for unreadable content
/// - [`ShardError::NoAddresses`] when the input yields nothing usable (an
///   exclusion list that removes everything is not an error)
pub fn prepare<F: FileSystem + ?Sized>(fs: &F, source: &PoolSource) -> Result<Pool, ShardError> {
    let loader = AddressLoader::new(fs).with_max_range_size(source.max_range_size);

    let input = loader.load(&source.input, ListKind::Input)?;
    if input.is_empty() {
        return Err(ShardError::NoAddresses(source.input.clone()));
    }
    let mut skipped_lines = input.skipped.len();

    let exclusions: ExclusionSet = match &source.exclude {
        Some(path) => {
            let excluded = loader.load(path, ListKind::Exclude)?;
            skipped_lines += excluded.skipped.len();
            excluded.addresses.iter().collect()
        }
        None => ExclusionSet::new(),
    };

    let loaded = input.addresses.len();
    let addresses = exclusion::filter(input.addresses, &exclusions);

    let pool = Pool {
        addresses,
        exclusions,
        loaded,
        skipped_lines,
    };
    log_summary(&source.input, source.exclude.as_deref(), &pool);
    Ok(pool)
}

fn log_summary(input: &Path, exclude: Option<&Path>, pool: &Pool) {
    info!(
        "Loaded {} from {}",
        plural(pool.loaded, "address", "addresses"),
        input.display()
    );
    if let Some(exclude) = exclude {
        info!(
            "Excluded {} using {}",
            plural(pool.excluded(), "address", "addresses"),
            exclude.display()
        );
    }
    if pool.skipped_lines > 0 {
        warn!(
            "Skipped {} with invalid addresses or ranges",
            plural(pool.skipped_lines, "line", "lines")
        );
    }
}
