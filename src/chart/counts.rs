use serde::Serialize;
use std::collections::BTreeMap;

/// Group label used for records with no key
pub const MISSING_KEY: &str = "(none)";

/// Record counts per group, sorted by group key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedCounts {
    entries: Vec<(String, usize)>,
}

impl GroupedCounts {
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|&(_, c)| c).max().unwrap_or(0)
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|&(_, c)| c)
    }
}

/// Count records per key. Records whose key is `None` (or blank) are
/// counted under [`MISSING_KEY`], so the total always equals the input
/// length.
pub fn grouped_counts<T, F>(records: &[T], key: F) -> GroupedCounts
where
    F: Fn(&T) -> Option<&str>,
{
    let mut groups: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        let k = match key(record).map(str::trim) {
            Some(k) if !k.is_empty() => k,
            _ => MISSING_KEY,
        };
        *groups.entry(k.to_string()).or_default() += 1;
    }

    GroupedCounts {
        entries: groups.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bench;

    fn bench(district: Option<&str>) -> Bench {
        Bench::new(district.map(str::to_string), None, 34.0, -118.3)
    }

    #[test]
    fn test_counts_by_district() {
        let benches = vec![
            bench(Some("CD-04")),
            bench(Some("CD-10")),
            bench(Some("CD-04")),
            bench(None),
            bench(Some("  ")),
        ];

        let counts = grouped_counts(&benches, |b| b.council_district.as_deref());
        assert_eq!(
            counts.entries(),
            &[
                ("(none)".to_string(), 2),
                ("CD-04".to_string(), 2),
                ("CD-10".to_string(), 1),
            ]
        );
        assert_eq!(counts.total(), benches.len());
        assert_eq!(counts.max_count(), 2);
        assert_eq!(counts.get("CD-10"), Some(1));
        assert_eq!(counts.get("CD-99"), None);
    }

    #[test]
    fn test_empty_input() {
        let counts = grouped_counts::<Bench, _>(&[], |b| b.city_area.as_deref());
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.max_count(), 0);
    }
}
