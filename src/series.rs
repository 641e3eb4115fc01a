use crate::color::ColorValue;
use crate::data::Row;
use crate::palette::ColorAssigner;
use serde::Serialize;
use std::collections::HashMap;

/// One (x, y) observation. Either coordinate may be NaN.
pub type Point = (f64, f64);

/// One category's points plus its display name and color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub color: ColorValue,
    pub points: Vec<Point>,
}

/// Column positions the series builder reads from each row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRoles {
    pub x: usize,
    pub y: usize,
    pub category: usize,
}

/// Result of bucketing rows into series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBuild {
    /// One series per category, in category order
    pub series: Vec<Series>,
    /// Rows whose category value had no series slot (or no category cell)
    pub skipped_rows: usize,
}

impl SeriesBuild {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Parse a numeric cell. Text that is not a decimal number becomes NaN.
///
/// Only decimal literals count: `inf`, `infinity` and `NaN` spellings are
/// text, not numbers.
pub fn parse_numeric(cell: &str) -> f64 {
    let text = cell.trim();
    if text
        .chars()
        .any(|c| c.is_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

/// Bucket every row's (x, y) pair into the series of its category.
///
/// Colors are requested once, `categories.len()` of them. A row whose category
/// value is not in `categories` is skipped and counted in
/// [`SeriesBuild::skipped_rows`].
pub fn build_series<C: ColorAssigner + ?Sized>(
    roles: ColumnRoles,
    categories: &[String],
    rows: &[Row],
    colors: &mut C,
) -> SeriesBuild {
    let palette = colors.assign_colors(categories.len());

    let mut series: Vec<Series> = categories
        .iter()
        .zip(palette)
        .map(|(name, color)| Series {
            name: name.clone(),
            color,
            points: Vec::new(),
        })
        .collect();

    // First index wins if the caller passed duplicate categories
    let mut slot_by_value: HashMap<&str, usize> = HashMap::with_capacity(categories.len());
    for (i, cat) in categories.iter().enumerate() {
        slot_by_value.entry(cat.as_str()).or_insert(i);
    }

    let mut skipped_rows = 0;
    for row in rows {
        let slot = row
            .get(roles.category)
            .and_then(|value| slot_by_value.get(value.as_str()));
        let Some(&slot) = slot else {
            skipped_rows += 1;
            continue;
        };

        let x = row.get(roles.x).map_or(f64::NAN, |c| parse_numeric(c));
        let y = row.get(roles.y).map_or(f64::NAN, |c| parse_numeric(c));
        series[slot].points.push((x, y));
    }

    if skipped_rows > 0 {
        log::warn!(
            "Skipped {} of {} rows with no matching category series",
            skipped_rows,
            rows.len()
        );
    }

    SeriesBuild {
        series,
        skipped_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::extract_categories;
    use crate::palette::PaletteColorAssigner;

    fn rows(data: &[&[&str]]) -> Vec<Row> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    const ROLES: ColumnRoles = ColumnRoles {
        x: 0,
        y: 1,
        category: 2,
    };

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("3.5"), 3.5);
        assert_eq!(parse_numeric(" -2 "), -2.0);
        assert_eq!(parse_numeric("1e3"), 1000.0);
        assert!(parse_numeric("abc").is_nan());
        assert!(parse_numeric("").is_nan());
    }

    #[test]
    fn test_parse_numeric_rejects_infinity_and_nan_words() {
        assert!(parse_numeric("inf").is_nan());
        assert!(parse_numeric("infinity").is_nan());
        assert!(parse_numeric("-INF").is_nan());
        assert!(parse_numeric("+Infinity").is_nan());
        assert!(parse_numeric("NaN").is_nan());
        assert!(parse_numeric("e").is_nan());
        assert_eq!(parse_numeric("-2.5E-1"), -0.25);
    }

    #[test]
    fn test_grouping_end_to_end() {
        let rows = rows(&[
            &["1.0", "2.0", "X"],
            &["2.0", "3.0", "Y"],
            &["3.0", "1.0", "X"],
        ]);
        let categories = extract_categories(2, &rows);
        assert_eq!(categories, vec!["X", "Y"]);

        let build = build_series(ROLES, &categories, &rows, &mut PaletteColorAssigner::default());
        assert_eq!(build.skipped_rows, 0);
        assert_eq!(build.series.len(), 2);
        assert_eq!(build.series[0].name, "X");
        assert_eq!(build.series[0].points, vec![(1.0, 2.0), (3.0, 1.0)]);
        assert_eq!(build.series[1].name, "Y");
        assert_eq!(build.series[1].points, vec![(2.0, 3.0)]);
    }

    #[test]
    fn test_one_point_per_row() {
        let rows = rows(&[
            &["1", "1", "a"],
            &["2", "2", "b"],
            &["3", "3", "c"],
            &["4", "4", "a"],
            &["5", "5", "b"],
        ]);
        let categories = extract_categories(2, &rows);
        let build = build_series(ROLES, &categories, &rows, &mut PaletteColorAssigner::default());
        assert_eq!(build.point_count(), rows.len());
        for (s, c) in build.series.iter().zip(&categories) {
            assert_eq!(&s.name, c);
        }
    }

    #[test]
    fn test_colors_follow_category_order() {
        let rows = rows(&[&["1", "1", "b"], &["2", "2", "a"]]);
        let categories = extract_categories(2, &rows);
        let mut palette = PaletteColorAssigner::default();
        let build = build_series(ROLES, &categories, &rows, &mut palette.clone());
        assert_eq!(build.series[0].color, palette.get_color(0));
        assert_eq!(build.series[1].color, palette.get_color(1));
        assert_eq!(palette.assign_colors(2).len(), 2);
    }

    #[test]
    fn test_non_numeric_cells_propagate_nan() {
        let rows = rows(&[&["abc", "2", "A"], &["1", "", "A"]]);
        let categories = extract_categories(2, &rows);
        let build = build_series(ROLES, &categories, &rows, &mut PaletteColorAssigner::default());
        let points = &build.series[0].points;
        assert_eq!(points.len(), 2);
        assert!(points[0].0.is_nan());
        assert_eq!(points[0].1, 2.0);
        assert!(points[1].1.is_nan());
    }

    #[test]
    fn test_category_miss_is_skipped_and_counted() {
        let rows = rows(&[&["1", "1", "A"], &["2", "2", "Z"], &["3", "3"]]);
        let categories = vec!["A".to_string()];
        let build = build_series(ROLES, &categories, &rows, &mut PaletteColorAssigner::default());
        assert_eq!(build.skipped_rows, 2);
        assert_eq!(build.series[0].points, vec![(1.0, 1.0)]);
    }

    #[test]
    fn test_empty_categories_yield_empty_series() {
        let rows = rows(&[&["1", "1", "A"]]);
        let build = build_series(ROLES, &[], &rows, &mut PaletteColorAssigner::default());
        assert!(build.series.is_empty());
        assert_eq!(build.skipped_rows, 1);
    }
}
