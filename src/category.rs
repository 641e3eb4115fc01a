use crate::data::Row;
use std::collections::HashSet;

/// Distinct values of the category column, in first-seen order.
///
/// Membership is exact string equality. Rows too short to hold the column
/// contribute nothing.
pub fn extract_categories(category_index: usize, rows: &[Row]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut categories = Vec::new();

    for row in rows {
        let Some(value) = row.get(category_index) else {
            continue;
        };
        if seen.insert(value.as_str()) {
            categories.push(value.clone());
        }
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Row> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_first_occurrence_order() {
        let rows = rows(&[&["1", "A"], &["2", "B"], &["3", "A"]]);
        assert_eq!(extract_categories(1, &rows), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_rows() {
        assert!(extract_categories(0, &[]).is_empty());
    }

    #[test]
    fn test_no_coercion() {
        // "a", "A", " a" and "1.0" vs "1" are all distinct keys
        let rows = rows(&[&["a"], &["A"], &[" a"], &["1"], &["1.0"], &["a"]]);
        assert_eq!(extract_categories(0, &rows), vec!["a", "A", " a", "1", "1.0"]);
    }

    #[test]
    fn test_no_duplicates() {
        let rows = rows(&[&["x", "B"], &["x", "B"], &["x", "C"], &["x", "B"], &["x", "D"]]);
        let cats = extract_categories(1, &rows);
        let unique: HashSet<_> = cats.iter().collect();
        assert_eq!(unique.len(), cats.len());
        assert_eq!(cats, vec!["B", "C", "D"]);
    }

    #[test]
    fn test_short_rows_skipped() {
        let rows = rows(&[&["1", "A"], &["2"], &["3", "B"]]);
        assert_eq!(extract_categories(1, &rows), vec!["A", "B"]);
    }
}
