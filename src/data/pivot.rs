use std::collections::BTreeMap;

use super::fields::parse_fields;
use super::model::{
    ParsedFields, PivotResult, RawRecord, SelectedCategories, WideRow, DEFAULT_CATEGORIES,
};

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// Sum `value` per category, keeping first-encounter order. Records missing
/// either field are skipped.
pub fn category_totals(fields: &[ParsedFields]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for f in fields {
        let (Some(category), Some(value)) = (&f.category, f.value) else {
            continue;
        };
        match totals.iter_mut().find(|(c, _)| c == category) {
            Some((_, total)) => *total += value,
            None => totals.push((category.clone(), value)),
        }
    }
    totals
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Pick the two highest totals. Equal totals keep first-encounter order.
/// Missing slots are filled with [`DEFAULT_CATEGORIES`], skipping duplicates.
pub fn select_categories(totals: &[(String, f64)]) -> SelectedCategories {
    let mut ranked: Vec<&(String, f64)> = totals.iter().collect();
    // `sort_by` is stable, which is what keeps ties in encounter order.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut chosen: Vec<String> = ranked.into_iter().take(2).map(|(c, _)| c.clone()).collect();
    for default in DEFAULT_CATEGORIES {
        if chosen.len() == 2 {
            break;
        }
        if !chosen.iter().any(|c| c == default) {
            chosen.push(default.to_string());
        }
    }

    let mut it = chosen.into_iter();
    match (it.next(), it.next()) {
        (Some(first), Some(second)) => SelectedCategories::new(first, second),
        // Two distinct defaults always fill both slots.
        _ => SelectedCategories::default(),
    }
}

// ---------------------------------------------------------------------------
// Pivot
// ---------------------------------------------------------------------------

/// Long → wide: one row per year holding the selected categories' values.
/// A repeated (year, category) pair overwrites the earlier value.
pub fn pivot(fields: &[ParsedFields], selected: &SelectedCategories) -> Vec<WideRow> {
    let mut by_year: BTreeMap<i32, WideRow> = BTreeMap::new();
    for f in fields {
        let (Some(year), Some(category), Some(value)) = (f.year, &f.category, f.value) else {
            continue;
        };
        let Some(slot) = selected.index_of(category) else {
            continue;
        };
        by_year
            .entry(year)
            .or_insert_with(|| WideRow::empty(year))
            .values[slot] = Some(value);
    }
    by_year.into_values().collect()
}

/// Full recomputation over a record set.
pub fn aggregate(records: &[RawRecord]) -> PivotResult {
    let fields: Vec<ParsedFields> = records.iter().map(parse_fields).collect();
    let totals = category_totals(&fields);
    let categories = select_categories(&totals);
    let rows = pivot(&fields, &categories);
    PivotResult {
        categories,
        totals,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn record(year: i64, sector: &str, value: CellValue) -> RawRecord {
        RawRecord::new()
            .with("year", CellValue::Integer(year))
            .with("sector", CellValue::String(sector.to_string()))
            .with("value", value)
    }

    fn num(v: f64) -> CellValue {
        CellValue::Float(v)
    }

    fn labels(s: &SelectedCategories) -> Vec<&str> {
        s.labels().iter().map(String::as_str).collect()
    }

    #[test]
    fn top_two_totals_are_selected() {
        let records = vec![
            record(2020, "A", num(100.0)),
            record(2020, "B", num(50.0)),
            record(2020, "C", num(75.0)),
        ];
        let result = aggregate(&records);
        assert_eq!(labels(&result.categories), vec!["A", "C"]);
    }

    #[test]
    fn totals_accumulate_across_years() {
        let records = vec![
            record(2020, "A", num(10.0)),
            record(2021, "B", num(30.0)),
            record(2022, "A", num(25.0)),
        ];
        let result = aggregate(&records);
        assert_eq!(
            result.totals,
            vec![("A".to_string(), 35.0), ("B".to_string(), 30.0)]
        );
        assert_eq!(labels(&result.categories), vec!["A", "B"]);
    }

    #[test]
    fn ties_keep_first_encounter_order() {
        let totals = vec![
            ("Transport".to_string(), 10.0),
            ("Power".to_string(), 20.0),
            ("Industry".to_string(), 10.0),
            ("Buildings".to_string(), 20.0),
        ];
        assert_eq!(
            labels(&select_categories(&totals)),
            vec!["Power", "Buildings"]
        );

        let totals = vec![("X".to_string(), 5.0), ("Y".to_string(), 5.0), ("Z".to_string(), 5.0)];
        assert_eq!(labels(&select_categories(&totals)), vec!["X", "Y"]);
    }

    #[test]
    fn no_categories_selects_defaults() {
        assert_eq!(labels(&select_categories(&[])), vec!["power", "transport"]);
    }

    #[test]
    fn single_category_is_padded_without_duplicates() {
        let only = |c: &str| vec![(c.to_string(), 1.0)];
        assert_eq!(labels(&select_categories(&only("Energy"))), vec!["Energy", "power"]);
        assert_eq!(labels(&select_categories(&only("power"))), vec!["power", "transport"]);
        assert_eq!(
            labels(&select_categories(&only("transport"))),
            vec!["transport", "power"]
        );
    }

    #[test]
    fn selection_always_has_two_labels() {
        for n in 0..5 {
            let totals: Vec<(String, f64)> =
                (0..n).map(|i| (format!("c{i}"), i as f64)).collect();
            assert_eq!(select_categories(&totals).labels().len(), 2);
        }
    }

    #[test]
    fn duplicate_year_category_is_last_write_wins() {
        let records = vec![
            record(2020, "Power", CellValue::String("1,200".to_string())),
            record(2020, "Power", num(100.0)),
        ];
        let result = aggregate(&records);
        assert_eq!(result.totals, vec![("Power".to_string(), 1300.0)]);
        let slot = result.categories.index_of("Power").unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].year, 2020);
        assert_eq!(result.rows[0].values[slot], Some(100.0));
    }

    #[test]
    fn rows_are_ascending_and_unique_by_year() {
        let records = vec![
            record(2022, "A", num(1.0)),
            record(2019, "B", num(2.0)),
            record(2022, "B", num(3.0)),
            record(2020, "A", num(4.0)),
            record(2019, "A", num(5.0)),
        ];
        let rows = aggregate(&records).rows;
        let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2019, 2020, 2022]);
        assert!(years.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn unselected_categories_are_left_out_of_the_pivot() {
        let records = vec![
            record(2020, "A", num(100.0)),
            record(2020, "B", num(90.0)),
            record(2021, "C", num(1.0)),
        ];
        let result = aggregate(&records);
        assert_eq!(labels(&result.categories), vec!["A", "B"]);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].values, [Some(100.0), Some(90.0)]);
        assert!(result.totals.iter().any(|(c, t)| c == "C" && *t == 1.0));
    }

    #[test]
    fn missing_field_in_year_leaves_null() {
        let records = vec![
            record(2020, "A", num(5.0)),
            record(2020, "B", num(4.0)),
            record(2021, "A", num(6.0)),
        ];
        let rows = aggregate(&records).rows;
        assert_eq!(rows[1].year, 2021);
        assert_eq!(rows[1].values, [Some(6.0), None]);
    }

    #[test]
    fn record_without_value_contributes_nothing() {
        let records = vec![
            record(2020, "A", num(5.0)),
            RawRecord::new()
                .with("year", CellValue::Integer(2021))
                .with("sector", CellValue::String("A".into())),
        ];
        let result = aggregate(&records);
        assert_eq!(result.totals, vec![("A".to_string(), 5.0)]);
        assert_eq!(result.rows.len(), 1);
    }

    #[test]
    fn record_without_year_counts_toward_totals_only() {
        let records = vec![
            RawRecord::new()
                .with("sector", CellValue::String("A".into()))
                .with("value", num(50.0)),
            record(2020, "B", num(10.0)),
        ];
        let result = aggregate(&records);
        assert_eq!(labels(&result.categories), vec!["A", "B"]);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].values, [None, Some(10.0)]);
    }

    #[test]
    fn empty_input_gives_defaults_and_no_rows() {
        let result = aggregate(&[]);
        assert!(result.rows.is_empty());
        assert_eq!(labels(&result.categories), vec!["power", "transport"]);
    }

    #[test]
    fn default_labels_pivot_matching_rows() {
        // Only "power" observed: pads with "transport", which has no data.
        let records = vec![record(2018, "power", num(2.0))];
        let result = aggregate(&records);
        assert_eq!(
            result.rows,
            vec![WideRow {
                year: 2018,
                values: [Some(2.0), None],
            }]
        );
    }
}
