//! Exclusion list matching.
//!
//! Addresses may appear bare (`10.0.0.5`) or with a port-style suffix
//! (`10.0.0.5:8080`). Every bare exclusion entry is also stored as
//! `entry + ":"`, and each candidate is checked both as-is and by its host
//! part plus `":"`, so a bare exclusion removes the decorated forms too.

use std::collections::HashSet;

/// Set of addresses to drop before sharding.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    entries: HashSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, plus its `":"`-suffixed form when it has no colon.
    pub fn insert(&mut self, addr: &str) {
        if !addr.contains(':') {
            self.entries.insert(format!("{}:", addr));
        }
        self.entries.insert(addr.to_string());
    }

    /// Whether `addr` would be dropped by [`filter`].
    pub fn excludes(&self, addr: &str) -> bool {
        if self.entries.contains(addr) {
            return true;
        }
        let host = host_part(addr);
        self.entries.contains(&format!("{}:", host))
    }

    /// Number of stored entries, decorated forms included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ExclusionSet::new();
        for addr in iter {
            set.insert(addr.as_ref());
        }
        set
    }
}

/// Host part of an address: everything before the first `:`.
pub fn host_part(addr: &str) -> &str {
    addr.split_once(':').map_or(addr, |(host, _)| host)
}

/// Drop excluded addresses, keeping the relative order of the rest.
pub fn filter(addresses: Vec<String>, exclusions: &ExclusionSet) -> Vec<String> {
    if exclusions.is_empty() {
        return addresses;
    }
    addresses
        .into_iter()
        .filter(|addr| !exclusions.excludes(addr))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bare_entry_is_decorated() {
        let set: ExclusionSet = ["10.0.0.5"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.excludes("10.0.0.5"));
        assert!(set.excludes("10.0.0.5:"));
    }

    #[test]
    fn test_bare_entry_excludes_decorated_input() {
        let set: ExclusionSet = ["10.0.0.5"].into_iter().collect();
        let input = strings(&["10.0.0.4", "10.0.0.5", "10.0.0.5:8080", "10.0.0.6:22"]);
        assert_eq!(filter(input, &set), strings(&["10.0.0.4", "10.0.0.6:22"]));
    }

    #[test]
    fn test_decorated_entry_matches_exactly_only() {
        let set: ExclusionSet = ["10.0.0.5:8080"].into_iter().collect();
        assert_eq!(set.len(), 1);
        let input = strings(&["10.0.0.5", "10.0.0.5:8080", "10.0.0.5:443"]);
        assert_eq!(filter(input, &set), strings(&["10.0.0.5", "10.0.0.5:443"]));
    }

    #[test]
    fn test_trailing_colon_entry_excludes_host_and_ports() {
        let set: ExclusionSet = ["10.0.0.5:"].into_iter().collect();
        assert_eq!(set.len(), 1);
        let input = strings(&["10.0.0.5", "10.0.0.5:1", "10.0.0.50"]);
        assert_eq!(filter(input, &set), strings(&["10.0.0.50"]));
    }

    #[test]
    fn test_prefix_addresses_not_excluded() {
        let set: ExclusionSet = ["10.0.0.1"].into_iter().collect();
        let input = strings(&["10.0.0.1", "10.0.0.10", "10.0.0.100"]);
        assert_eq!(filter(input, &set), strings(&["10.0.0.10", "10.0.0.100"]));
    }

    #[test]
    fn test_empty_set_passes_through() {
        let input = strings(&["b", "a", "c"]);
        assert_eq!(filter(input.clone(), &ExclusionSet::new()), input);
    }

    #[test]
    fn test_order_preserved() {
        let set: ExclusionSet = ["2.2.2.2"].into_iter().collect();
        let input = strings(&["4.4.4.4", "2.2.2.2", "3.3.3.3", "1.1.1.1"]);
        assert_eq!(
            filter(input, &set),
            strings(&["4.4.4.4", "3.3.3.3", "1.1.1.1"])
        );
    }

    #[test]
    fn test_host_part() {
        assert_eq!(host_part("10.0.0.1"), "10.0.0.1");
        assert_eq!(host_part("10.0.0.1:80"), "10.0.0.1");
        assert_eq!(host_part("10.0.0.1:"), "10.0.0.1");
        assert_eq!(host_part("a:b:c"), "a");
    }
}
