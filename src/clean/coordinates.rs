use crate::domain::Located;

/// Keep records that have a real position.
///
/// Rows placed at exactly (0, 0) are ungeocoded placeholders. The test is
/// on the coordinates themselves, so it holds regardless of row order.
pub fn retain_positioned<T: Located>(records: Vec<T>) -> Vec<T> {
    records.into_iter().filter(|r| !r.is_at_origin()).collect()
}
