use crate::config::defaults::{EXCLUDED_MARKERS, PALM_MARKER};
use crate::domain::Tree;
use serde::Serialize;

/// Excludes trees whose common name contains any configured marker.
///
/// Matching is case-sensitive substring search; the inventory stores
/// common names in upper case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    markers: Vec<String>,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::new(EXCLUDED_MARKERS.iter().map(|m| m.to_string()))
    }
}

impl CategoryFilter {
    /// Empty markers are ignored, since they would match every name
    pub fn new(markers: impl IntoIterator<Item = String>) -> Self {
        let mut markers: Vec<String> = markers.into_iter().filter(|m| !m.is_empty()).collect();
        markers.sort();
        markers.dedup();
        Self { markers }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn is_excluded(&self, common_name: &str) -> bool {
        self.markers.iter().any(|m| common_name.contains(m.as_str()))
    }

    pub fn apply(&self, trees: Vec<Tree>) -> Vec<Tree> {
        trees
            .into_iter()
            .filter(|t| !self.is_excluded(&t.common_name))
            .collect()
    }

    /// The same filter minus one marker
    pub fn without(&self, marker: &str) -> Self {
        Self {
            markers: self
                .markers
                .iter()
                .filter(|m| m.as_str() != marker)
                .cloned()
                .collect(),
        }
    }
}

/// Palm versus shade-tree comparison along the corridor
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PalmSplit {
    pub palms: usize,
    pub shade: usize,
}

impl PalmSplit {
    /// Shade trees per palm; None when there are no palms
    pub fn shade_per_palm(&self) -> Option<f64> {
        (self.palms > 0).then(|| self.shade as f64 / self.palms as f64)
    }
}

/// Count palms and shade trees among positioned trees.
///
/// Every marker except the palm marker still disqualifies a tree (unknown
/// species, vacant sites), so only identified trees are compared.
pub fn split_palms(trees: &[Tree], palm_marker: &str, categories: &CategoryFilter) -> PalmSplit {
    let palm_marker = if palm_marker.is_empty() {
        PALM_MARKER
    } else {
        palm_marker
    };
    let others = categories.without(palm_marker);

    let mut split = PalmSplit::default();
    for tree in trees.iter().filter(|t| !others.is_excluded(&t.common_name)) {
        if tree.common_name.contains(palm_marker) {
            split.palms += 1;
        } else {
            split.shade += 1;
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(name: &str) -> Tree {
        Tree::new(name, name, 34.06, -118.3)
    }

    #[test]
    fn test_excluded_substrings() {
        let filter = CategoryFilter::default();
        assert!(filter.is_excluded("MEXICAN FAN PALM"));
        assert!(filter.is_excluded("NULL"));
        assert!(filter.is_excluded("OTHER"));
        assert!(filter.is_excluded("VACANT (PLANTING SITE)"));
        assert!(!filter.is_excluded("CORAL TREE"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let filter = CategoryFilter::default();
        assert!(!filter.is_excluded("Queen palm"));
    }

    #[test]
    fn test_no_retained_name_contains_marker() {
        let filter = CategoryFilter::new(vec!["PALM".to_string(), "NULL".to_string()]);
        let trees = vec![
            tree("QUEEN PALM"),
            tree("NULL"),
            tree("LONDON PLANE"),
            tree("PALMETTO"),
        ];

        let kept = filter.apply(trees);
        assert_eq!(kept.len(), 1);
        for t in &kept {
            for m in filter.markers() {
                assert!(!t.common_name.contains(m.as_str()));
            }
        }

        let again = filter.apply(kept.clone());
        assert_eq!(again, kept);
    }

    #[test]
    fn test_empty_markers_ignored() {
        let filter = CategoryFilter::new(vec![String::new(), "PALM".to_string()]);
        assert_eq!(filter.markers(), &["PALM".to_string()]);
        assert!(!filter.is_excluded("OAK"));
    }

    #[test]
    fn test_split_palms() {
        let trees = vec![
            tree("QUEEN PALM"),
            tree("MEXICAN FAN PALM"),
            tree("CORAL TREE"),
            tree("JACARANDA"),
            tree("SYCAMORE"),
            tree("NULL"),
            tree("VACANT"),
        ];

        let split = split_palms(&trees, "PALM", &CategoryFilter::default());
        assert_eq!(split, PalmSplit { palms: 2, shade: 3 });
        assert_eq!(split.shade_per_palm(), Some(1.5));

        assert_eq!(PalmSplit::default().shade_per_palm(), None);
    }
}
