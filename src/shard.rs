//! Deterministic sharding of address lists.
//!
//! The list is shuffled with a PRNG seeded from a caller-supplied integer and
//! then dealt round-robin into `Y` shards. Every machine that runs with the
//! same seed and the same list computes the same partition, so each one can
//! pick its own shard without coordination.
//!
//! ChaCha8 is used instead of `StdRng` because its output stream is fixed
//! across `rand` releases and platforms.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ShardError;

/// Shard `index` out of `total`, both 1-based. Always satisfies
/// `1 <= index <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShardSpec {
    index: usize,
    total: usize,
}

impl ShardSpec {
    /// Build a spec, rejecting `total < 1`, `index < 1` and `index > total`.
    pub fn new(index: i64, total: i64) -> Result<Self, ShardError> {
        let invalid = || ShardError::InvalidShardValue {
            index: index.to_string(),
            total: total.to_string(),
        };
        if total < 1 || index < 1 || index > total {
            return Err(invalid());
        }
        Ok(Self {
            index: usize::try_from(index).map_err(|_| invalid())?,
            total: usize::try_from(total).map_err(|_| invalid())?,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether permuted position `position` belongs to this shard.
    pub fn owns(&self, position: usize) -> bool {
        shard_of(position, self.total) == self.index
    }
}

impl FromStr for ShardSpec {
    type Err = ShardError;

    /// Parse an `X/Y` descriptor.
    ///
    /// `X` and `Y` may be arbitrarily large. Values past `usize::MAX` are
    /// range-checked exactly and then saturated, which deals every pool
    /// shorter than `usize::MAX` the same way the exact value would.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid_format = || ShardError::InvalidShardFormat(s.to_string());

        let (x, y) = s.split_once('/').ok_or_else(invalid_format)?;
        if y.contains('/') {
            return Err(invalid_format());
        }
        let index = Integer::parse(x).ok_or_else(invalid_format)?;
        let total = Integer::parse(y).ok_or_else(invalid_format)?;

        if !total.is_positive() || !index.is_positive() || index.magnitude_cmp(&total).is_gt() {
            return Err(ShardError::InvalidShardValue {
                index: x.trim().to_string(),
                total: y.trim().to_string(),
            });
        }

        Ok(Self {
            index: index.saturating_usize(),
            total: total.saturating_usize(),
        })
    }
}

/// Decimal integer of unbounded size, as written in a descriptor.
struct Integer<'a> {
    negative: bool,
    /// Magnitude without leading zeros; empty for zero
    digits: &'a str,
}

impl<'a> Integer<'a> {
    fn parse(s: &'a str) -> Option<Self> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            negative,
            digits: digits.trim_start_matches('0'),
        })
    }

    fn is_positive(&self) -> bool {
        !self.negative && !self.digits.is_empty()
    }

    fn magnitude_cmp(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(other.digits))
    }

    fn saturating_usize(&self) -> usize {
        self.digits.parse().unwrap_or(usize::MAX)
    }
}

impl fmt::Display for ShardSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.total)
    }
}

/// 1-based shard that permuted position `position` is dealt to.
pub fn shard_of(position: usize, total: usize) -> usize {
    position % total + 1
}

/// Seeded permutation and round-robin dealing.
#[derive(Debug, Clone, Copy)]
pub struct Sharder {
    seed: u64,
}

impl Sharder {
    /// Negative seeds are accepted and reinterpreted bit for bit.
    pub fn new(seed: i64) -> Self {
        Self {
            seed: u64::from_ne_bytes(seed.to_ne_bytes()),
        }
    }

    fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }

    /// Shuffle `addresses` in place with the seeded generator.
    pub fn permute<T>(&self, addresses: &mut [T]) {
        let mut rng = self.rng();
        addresses.shuffle(&mut rng);
    }

    /// Addresses of shard `spec`, in permuted order.
    pub fn shard(&self, mut addresses: Vec<String>, spec: ShardSpec) -> Vec<String> {
        self.permute(&mut addresses);
        addresses
            .into_iter()
            .enumerate()
            .filter(|(position, _)| spec.owns(*position))
            .map(|(_, addr)| addr)
            .collect()
    }

    /// All `total` shards at once; element `i` holds shard `i + 1`.
    pub fn partition(&self, mut addresses: Vec<String>, total: usize) -> Vec<Vec<String>> {
        let total = total.max(1);
        self.permute(&mut addresses);

        let mut shards: Vec<Vec<String>> = (0..total)
            .map(|_| Vec::with_capacity(addresses.len() / total + 1))
            .collect();
        for (position, addr) in addresses.into_iter().enumerate() {
            shards[shard_of(position, total) - 1].push(addr);
        }
        shards
    }
}
