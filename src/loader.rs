//! Address list loading and CIDR expansion.
//!
//! A list file holds one token per line. Lines containing `/` are IPv4
//! networks and are expanded into every address they contain; any other
//! non-blank line is taken literally. Malformed networks are skipped with a
//! warning instead of failing the whole load.

use ipnet::{Ipv4AddrRange, Ipv4Net};
use std::io;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::ShardError;
use crate::fs_abstraction::FileSystem;

/// Which list a file is loaded as. Only affects the error reported when the
/// file is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Input,
    Exclude,
}

impl ListKind {
    fn not_found(self, path: PathBuf) -> ShardError {
        match self {
            ListKind::Input => ShardError::InputNotFound(path),
            ListKind::Exclude => ShardError::ExcludeNotFound(path),
        }
    }
}

/// A line dropped while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source file
    pub line_number: usize,
    pub entry: String,
    pub reason: String,
}

/// Result of loading a list file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedAddresses {
    pub addresses: Vec<String>,
    pub skipped: Vec<SkippedLine>,
}

impl LoadedAddresses {
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Loads address lists through a [`FileSystem`].
pub struct AddressLoader<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    max_range_size: Option<u64>,
}

impl<'a, F: FileSystem + ?Sized> AddressLoader<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self {
            fs,
            max_range_size: None,
        }
    }

    /// Skip CIDR lines that would expand to more than `limit` addresses.
    pub fn with_max_range_size(mut self, limit: Option<u64>) -> Self {
        self.max_range_size = limit;
        self
    }

    /// Load and expand the list at `path`.
    ///
    /// # Errors
    /// - [`ShardError::InputNotFound`] / [`ShardError::ExcludeNotFound`] if the
    ///   file does not exist (depending on `kind`)
    /// - [`ShardError::Load`] for any other read failure, including content
    ///   that is not valid UTF-8
    pub fn load(&self, path: &Path, kind: ListKind) -> Result<LoadedAddresses, ShardError> {
        if !self.fs.exists(path) {
            return Err(kind.not_found(path.to_path_buf()));
        }

        let content = self.fs.read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                kind.not_found(path.to_path_buf())
            } else {
                ShardError::Load {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let loaded = parse_addresses(&content, self.max_range_size);
        debug!(
            "Loaded {} addresses from {} ({} lines skipped)",
            loaded.addresses.len(),
            path.display(),
            loaded.skipped.len()
        );
        Ok(loaded)
    }
}

/// Parse list content into addresses, expanding CIDR lines.
///
/// Emission order is file order; each network contributes its addresses in
/// ascending order, network and broadcast addresses included.
pub fn parse_addresses(content: &str, max_range_size: Option<u64>) -> LoadedAddresses {
    let mut loaded = LoadedAddresses::default();

    for (idx, line) in content.lines().enumerate() {
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }

        if !entry.contains('/') {
            loaded.addresses.push(entry.to_string());
            continue;
        }

        let result = parse_network(entry).and_then(|net| {
            let size = range_size(&net);
            match max_range_size {
                Some(limit) if size > limit => Err(format!(
                    "range holds {} addresses, limit is {}",
                    size, limit
                )),
                _ => Ok(net),
            }
        });

        match result {
            Ok(net) => loaded.addresses.extend(expand(&net).map(|ip| ip.to_string())),
            Err(reason) => {
                warn!("Skipping invalid address or range: {} ({})", entry, reason);
                loaded.skipped.push(SkippedLine {
                    line_number: idx + 1,
                    entry: entry.to_string(),
                    reason,
                });
            }
        }
    }

    loaded
}

/// Parse an IPv4 network leniently: host bits are masked off, and the mask
/// may be given as a prefix length, a dotted netmask or a dotted hostmask
/// (`0.0.0.255` for a /24).
pub fn parse_network(entry: &str) -> Result<Ipv4Net, String> {
    let (addr, mask) = entry
        .split_once('/')
        .ok_or_else(|| "missing prefix length".to_string())?;

    let addr: Ipv4Addr = addr
        .parse()
        .map_err(|_| format!("invalid IPv4 address '{}'", addr))?;

    let is_prefix_len = !mask.is_empty() && mask.bytes().all(|b| b.is_ascii_digit());

    let net = if is_prefix_len {
        let prefix_len: u8 = mask
            .parse()
            .map_err(|_| format!("invalid prefix length '{}'", mask))?;
        Ipv4Net::new(addr, prefix_len).map_err(|_| format!("invalid prefix length '{}'", mask))?
    } else if let Ok(netmask) = mask.parse::<Ipv4Addr>() {
        let hostmask = Ipv4Addr::from(!u32::from(netmask));
        Ipv4Net::with_netmask(addr, netmask)
            .or_else(|_| Ipv4Net::with_netmask(addr, hostmask))
            .map_err(|_| format!("invalid netmask '{}'", mask))?
    } else {
        return Err(format!("invalid prefix length '{}'", mask));
    };

    Ok(net.trunc())
}

/// Every address in `net`, in ascending order.
pub fn expand(net: &Ipv4Net) -> Ipv4AddrRange {
    Ipv4AddrRange::new(net.network(), net.broadcast())
}

/// Number of addresses covered by `net`.
pub fn range_size(net: &Ipv4Net) -> u64 {
    1u64 << (32 - u32::from(net.prefix_len()))
}
