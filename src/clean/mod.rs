pub mod category;
pub mod coordinates;

pub use category::{CategoryFilter, PalmSplit, split_palms};
pub use coordinates::retain_positioned;

use crate::domain::Tree;
use serde::Serialize;

/// Row counts through the tree cleaning stages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub input: usize,
    pub zero_coordinates: usize,
    pub excluded_category: usize,
    pub retained: usize,
}

/// Drop ungeocoded trees, then trees whose common name marks them as
/// non-shade or unknown.
pub fn clean_trees(trees: Vec<Tree>, categories: &CategoryFilter) -> (Vec<Tree>, CleanReport) {
    let input = trees.len();

    let positioned = retain_positioned(trees);
    let zero_coordinates = input - positioned.len();

    let after_position = positioned.len();
    let shade = categories.apply(positioned);
    let excluded_category = after_position - shade.len();

    let report = CleanReport {
        input,
        zero_coordinates,
        excluded_category,
        retained: shade.len(),
    };
    tracing::debug!(?report, "cleaned trees");

    (shade, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Located;

    #[test]
    fn test_palm_at_origin_and_oak() {
        let trees = vec![
            Tree::new("1", "PALM X", 0.0, 0.0),
            Tree::new("2", "OAK", 34.05, -118.3),
        ];
        let filter = CategoryFilter::default();

        let (kept, report) = clean_trees(trees, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].common_name, "OAK");
        assert_eq!(
            report,
            CleanReport {
                input: 2,
                zero_coordinates: 1,
                excluded_category: 0,
                retained: 1,
            }
        );
    }

    #[test]
    fn test_report_counts_each_stage() {
        let trees = vec![
            Tree::new("1", "OAK", 0.0, 0.0),
            Tree::new("2", "QUEEN PALM", 34.06, -118.31),
            Tree::new("3", "NULL", 34.06, -118.32),
            Tree::new("4", "VACANT SITE", 34.06, -118.33),
            Tree::new("5", "SYCAMORE", 34.06, -118.34),
            Tree::new("6", "OTHER", 34.06, -118.35),
        ];

        let (kept, report) = clean_trees(trees, &CategoryFilter::default());
        assert_eq!(report.input, 6);
        assert_eq!(report.zero_coordinates, 1);
        assert_eq!(report.excluded_category, 4);
        assert_eq!(report.retained, 1);
        assert_eq!(kept[0].id, "5");
        assert!(kept.iter().all(|t| !t.is_at_origin()));
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let trees = vec![
            Tree::new("1", "OAK", 0.0, 0.0),
            Tree::new("2", "FAN PALM", 34.06, -118.31),
            Tree::new("3", "JACARANDA", 34.06, -118.32),
        ];
        let filter = CategoryFilter::default();

        let (once, _) = clean_trees(trees, &filter);
        let (twice, report) = clean_trees(once.clone(), &filter);
        assert_eq!(once, twice);
        assert_eq!(report.zero_coordinates, 0);
        assert_eq!(report.excluded_category, 0);
    }
}
