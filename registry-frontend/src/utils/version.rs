//! Version ordering for artifact version lists.
//!
//! Versions that parse as semver compare by semver precedence. Anything else
//! (`1.0`, `v2`, `1.0.0.1`) falls back to a lenient comparison that keeps the
//! same rules: numbers compare numerically, a numeric component outranks a
//! non-numeric one, and a release outranks its prerelease.

use semver::Version;
use std::cmp::Ordering;

pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse(a), parse(b)) {
        (Some(l), Some(r)) => precedence(&l, &r),
        _ => compare_lenient(a, b),
    }
}

/// Sort newest first.
pub fn sort_versions_desc(versions: &mut [String]) {
    versions.sort_by(|a, b| compare_versions(b, a));
}

fn parse(version: &str) -> Option<Version> {
    Version::parse(normalise(version)).ok()
}

fn normalise(version: &str) -> &str {
    let version = version.trim();
    version.strip_prefix('v').unwrap_or(version)
}

// Build metadata does not take part in precedence.
fn precedence(l: &Version, r: &Version) -> Ordering {
    (l.major, l.minor, l.patch)
        .cmp(&(r.major, r.minor, r.patch))
        .then_with(|| l.pre.cmp(&r.pre))
}

fn compare_lenient(a: &str, b: &str) -> Ordering {
    let (left_core, left_pre) = split_prerelease(a);
    let (right_core, right_pre) = split_prerelease(b);

    let left: Vec<&str> = left_core.split('.').collect();
    let right: Vec<&str> = right_core.split('.').collect();

    for i in 0..left.len().max(right.len()) {
        let l = left.get(i).copied().unwrap_or("0");
        let r = right.get(i).copied().unwrap_or("0");

        let ordering = compare_component(l, r);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    match (left_pre, right_pre) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(l), Some(r)) => compare_identifiers(l, r),
    }
}

fn split_prerelease(version: &str) -> (&str, Option<&str>) {
    let version = normalise(version);
    let version = version.split_once('+').map_or(version, |(core, _)| core);

    match version.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (version, None),
    }
}

fn compare_component(l: &str, r: &str) -> Ordering {
    match (l.parse::<u64>(), r.parse::<u64>()) {
        (Ok(l), Ok(r)) => l.cmp(&r),
        (Ok(_), Err(_)) => Ordering::Greater,
        (Err(_), Ok(_)) => Ordering::Less,
        (Err(_), Err(_)) => l.cmp(r),
    }
}

fn compare_identifiers(l: &str, r: &str) -> Ordering {
    let mut left = l.split('.');
    let mut right = r.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                // Numeric identifiers rank below alphanumeric ones.
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(versions: &[&str]) -> Vec<String> {
        let mut versions: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        sort_versions_desc(&mut versions);
        versions
    }

    #[test]
    fn test_numeric_components() {
        assert_eq!(compare_versions("1.10.0", "1.2.0"), Ordering::Greater);
        assert_eq!(compare_versions("2.0.0", "10.0.0"), Ordering::Less);
        assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("v1.2.3", "1.2.3"), Ordering::Equal);
    }

    #[test]
    fn test_sort_descending() {
        assert_eq!(sorted(&["1.2.0", "2.0.0", "1.10.0"]), vec!["2.0.0", "1.10.0", "1.2.0"]);
    }

    #[test]
    fn test_release_outranks_prerelease() {
        assert_eq!(sorted(&["1.0.0-beta", "1.0.0"]), vec!["1.0.0", "1.0.0-beta"]);
        assert_eq!(compare_versions("1.0.0", "1.0.0-rc.1"), Ordering::Greater);
        assert_eq!(compare_versions("1.1.0", "1.0.0-rc1"), Ordering::Greater);
    }

    #[test]
    fn test_prerelease_precedence() {
        assert_eq!(
            sorted(&["1.0.0-alpha", "1.0.0-rc.10", "1.0.0-beta", "1.0.0-rc.2", "1.0.0-alpha.1"]),
            vec!["1.0.0-rc.10", "1.0.0-rc.2", "1.0.0-beta", "1.0.0-alpha.1", "1.0.0-alpha"]
        );
    }

    #[test]
    fn test_build_metadata_is_ignored() {
        assert_eq!(compare_versions("1.0.0+build.5", "1.0.0+build.1"), Ordering::Equal);
    }

    #[test]
    fn test_lenient_versions() {
        assert_eq!(compare_versions("1.0", "1.0-beta"), Ordering::Greater);
        assert_eq!(compare_versions("1.2", "1.10.0-rc1"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0.1", "1.0.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.x", "1.0"), Ordering::Less);
        assert_eq!(sorted(&["2", "v10", "1.5"]), vec!["v10", "2", "1.5"]);
    }
}
