//! IP address and CIDR matcher.

use std::collections::HashSet;
use std::net::IpAddr;

use ipnet::IpNet;

/// Matcher for `.net.list` rule sets.
///
/// Bare addresses go into a hash set for O(1) lookup. CIDR blocks are kept
/// in declaration order and scanned linearly, since containment cannot use a
/// simple hash or binary search.
#[derive(Debug, Default)]
pub struct NetworkMatcher {
    exact: HashSet<IpAddr>,
    blocks: Vec<IpNet>,
}

impl NetworkMatcher {
    /// Compile rule lines, skipping malformed entries.
    ///
    /// A line containing `/` is a CIDR block, anything else a bare address.
    pub fn compile<S: AsRef<str>>(rules: &[S]) -> Self {
        let mut exact = HashSet::new();
        let mut blocks = Vec::new();

        for raw in rules {
            let raw = raw.as_ref();
            if raw.contains('/') {
                match raw.parse::<IpNet>() {
                    Ok(net) => blocks.push(net.trunc()),
                    Err(e) => {
                        tracing::warn!(rule = %raw, error = %e, "Skipping invalid CIDR");
                    }
                }
                continue;
            }

            match raw.parse::<IpAddr>() {
                Ok(ip) => {
                    exact.insert(ip.to_canonical());
                }
                Err(e) => {
                    tracing::warn!(rule = %raw, error = %e, "Skipping invalid IP");
                }
            }
        }

        Self { exact, blocks }
    }

    /// Returns true if the trimmed input is a listed address or inside a listed block.
    pub fn matches(&self, input: &str) -> bool {
        let ip = match input.trim().parse::<IpAddr>() {
            Ok(ip) => ip.to_canonical(),
            Err(_) => return false,
        };

        if self.exact.contains(&ip) {
            return true;
        }

        self.blocks.iter().any(|net| net.contains(&ip))
    }

    /// Total number of compiled entries (addresses plus blocks).
    pub fn len(&self) -> usize {
        self.exact.len() + self.blocks.len()
    }

    /// Returns true if nothing was compiled.
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> NetworkMatcher {
        NetworkMatcher::compile(&[
            "192.0.2.1",
            "198.51.100.0/24",
            "2001:db8::/48",
            "not-an-ip",
            "203.0.113.0/33",
        ])
    }

    #[test]
    fn exact_address() {
        let m = matcher();
        assert!(m.matches("192.0.2.1"));
        assert!(!m.matches("192.0.2.2"));
    }

    #[test]
    fn cidr_v4_and_v6() {
        let m = matcher();
        assert!(m.matches("198.51.100.25"));
        assert!(m.matches("198.51.100.255"));
        assert!(m.matches("2001:db8::1234"));
        assert!(!m.matches("2001:db9::1"));
    }

    #[test]
    fn invalid_entries_are_dropped() {
        let m = matcher();
        // "not-an-ip" and the /33 block never make it in.
        assert_eq!(m.len(), 3);
        assert!(!m.matches("203.0.113.12"));
        assert!(!m.matches("not-an-ip"));
    }

    #[test]
    fn input_is_trimmed() {
        assert!(matcher().matches(" 198.51.100.200 "));
    }

    #[test]
    fn mapped_v6_is_same_address() {
        let m = matcher();
        assert!(m.matches("::ffff:192.0.2.1"));
        assert!(m.matches("::ffff:198.51.100.7"));

        let mapped = NetworkMatcher::compile(&["::ffff:10.1.2.3"]);
        assert!(mapped.matches("10.1.2.3"));
    }

    #[test]
    fn host_bits_in_cidr_are_truncated() {
        let m = NetworkMatcher::compile(&["10.0.0.5/8"]);
        assert!(m.matches("10.200.0.1"));
        assert!(!m.matches("11.0.0.1"));
    }

    #[test]
    fn empty_matches_nothing() {
        let m = NetworkMatcher::compile::<&str>(&[]);
        assert!(m.is_empty());
        assert!(!m.matches("127.0.0.1"));
    }
}
