//! Logical field extraction from loosely-named CSV columns.
//!
//! Each logical field has an ordered list of accessor attempts. The lists
//! are plain slices so their priority order is visible and testable.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use super::model::{CellValue, ParsedFields, RawRecord};

/// How a column is turned into a calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearSource {
    /// The cell already holds the year.
    Direct(&'static str),
    /// Unix timestamp in seconds.
    UnixSeconds(&'static str),
    /// Free-form date text.
    DateText(&'static str),
}

pub const YEAR_SOURCES: &[YearSource] = &[
    YearSource::Direct("year"),
    YearSource::Direct("Year"),
    YearSource::UnixSeconds("timestamp"),
    YearSource::UnixSeconds("Timestamp"),
    YearSource::DateText("date"),
    YearSource::DateText("Date"),
];

pub const CATEGORY_FIELDS: &[&str] = &["sector", "Sector", "category", "Category"];

pub const VALUE_FIELDS: &[&str] = &["value", "Value", "amount", "Amount"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Extract all logical fields of a record.
pub fn parse_fields(record: &RawRecord) -> ParsedFields {
    ParsedFields {
        year: year_of(record),
        category: category_of(record),
        value: value_of(record),
    }
}

/// First year source that resolves wins; unparsable sources fall through.
pub fn year_of(record: &RawRecord) -> Option<i32> {
    YEAR_SOURCES.iter().find_map(|source| match *source {
        YearSource::Direct(col) => record.get(col).and_then(direct_year),
        YearSource::UnixSeconds(col) => record.get(col).and_then(unix_seconds_year),
        YearSource::DateText(col) => record
            .get(col)
            .and_then(|v| v.as_text())
            .and_then(|s| date_text_year(&s)),
    })
}

/// First non-empty label among [`CATEGORY_FIELDS`], trimmed.
pub fn category_of(record: &RawRecord) -> Option<String> {
    CATEGORY_FIELDS.iter().find_map(|col| {
        let text = record.get(col)?.as_text()?;
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// The first present candidate among [`VALUE_FIELDS`] decides; it must be
/// a finite number.
pub fn value_of(record: &RawRecord) -> Option<f64> {
    let cell = VALUE_FIELDS.iter().find_map(|col| record.get(col))?;
    cell.as_f64().filter(|v| v.is_finite())
}

fn direct_year(cell: &CellValue) -> Option<i32> {
    let v = cell.as_f64().filter(|v| v.is_finite() && v.fract() == 0.0)?;
    if v < i32::MIN as f64 || v > i32::MAX as f64 {
        return None;
    }
    Some(v as i32)
}

fn unix_seconds_year(cell: &CellValue) -> Option<i32> {
    let secs = cell.as_f64().filter(|v| v.is_finite())?;
    if secs.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(secs.floor() as i64, 0).map(|dt| dt.year())
}

/// Parse date text in any of the accepted layouts and return its year.
pub fn date_text_year(text: &str) -> Option<i32> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.year());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.year());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.year());
        }
    }
    // "YYYY-MM" and a bare "YYYY"
    let year_part = match s.split_once('-') {
        Some((y, m)) if m.len() <= 2 && m.parse::<u32>().is_ok_and(|m| (1..=12).contains(&m)) => y,
        Some(_) => return None,
        None => s,
    };
    if year_part.len() == 4 && year_part.bytes().all(|b| b.is_ascii_digit()) {
        return year_part.parse().ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(cells: &[(&str, CellValue)]) -> RawRecord {
        cells
            .iter()
            .fold(RawRecord::new(), |r, (k, v)| r.with(k, v.clone()))
    }

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn direct_year_beats_other_sources() {
        let r = rec(&[
            ("Year", CellValue::Integer(2015)),
            ("timestamp", CellValue::Integer(1_559_347_200)),
            ("date", s("2001-01-01")),
        ]);
        assert_eq!(year_of(&r), Some(2015));
    }

    #[test]
    fn lowercase_year_beats_capitalised() {
        let r = rec(&[("year", CellValue::Integer(2020)), ("Year", CellValue::Integer(1999))]);
        assert_eq!(year_of(&r), Some(2020));
    }

    #[test]
    fn timestamp_for_mid_2019_gives_2019() {
        // 2019-06-01T00:00:00Z
        let r = rec(&[("timestamp", CellValue::Integer(1_559_347_200))]);
        assert_eq!(year_of(&r), Some(2019));

        let r = rec(&[("Timestamp", s("1559347200"))]);
        assert_eq!(year_of(&r), Some(2019));
    }

    #[test]
    fn unparsable_year_falls_through_to_date() {
        let r = rec(&[("year", s("unknown")), ("Date", s("2017-03-04"))]);
        assert_eq!(year_of(&r), Some(2017));
    }

    #[test]
    fn unparsable_timestamp_falls_through_to_date() {
        let r = rec(&[("timestamp", s("soon")), ("Date", s("2017-03-04"))]);
        assert_eq!(year_of(&r), Some(2017));
    }

    #[test]
    fn fractional_year_is_rejected() {
        let r = rec(&[("year", CellValue::Float(2019.5))]);
        assert_eq!(year_of(&r), None);
    }

    #[test]
    fn date_text_layouts() {
        assert_eq!(date_text_year("2021-07-04T12:00:00Z"), Some(2021));
        assert_eq!(date_text_year("2021-07-04 08:30:00"), Some(2021));
        assert_eq!(date_text_year("2018/02/28"), Some(2018));
        assert_eq!(date_text_year("12/31/2016"), Some(2016));
        assert_eq!(date_text_year("March 3, 2014"), Some(2014));
        assert_eq!(date_text_year("3 March 2013"), Some(2013));
        assert_eq!(date_text_year("2012-05"), Some(2012));
        assert_eq!(date_text_year("2011"), Some(2011));
        assert_eq!(date_text_year("not a date"), None);
        assert_eq!(date_text_year("2012-5-xx"), None);
    }

    #[test]
    fn integer_date_cell_reads_as_year() {
        let r = rec(&[("date", CellValue::Integer(2010))]);
        assert_eq!(year_of(&r), Some(2010));
    }

    #[test]
    fn no_year_source_gives_none() {
        let r = rec(&[("sector", s("Power"))]);
        assert_eq!(year_of(&r), None);
    }

    #[test]
    fn category_priority_and_trim() {
        let r = rec(&[("Category", s("Other")), ("sector", s("  Power  "))]);
        assert_eq!(category_of(&r).as_deref(), Some("Power"));
    }

    #[test]
    fn blank_category_is_skipped() {
        let r = rec(&[("sector", s("   ")), ("category", s("Transport"))]);
        assert_eq!(category_of(&r).as_deref(), Some("Transport"));

        let r = rec(&[("sector", s("   "))]);
        assert_eq!(category_of(&r), None);
    }

    #[test]
    fn numeric_category_is_rendered_as_text() {
        let r = rec(&[("Sector", CellValue::Integer(7))]);
        assert_eq!(category_of(&r).as_deref(), Some("7"));
    }

    #[test]
    fn value_priority_and_separators() {
        let r = rec(&[("Amount", CellValue::Integer(1)), ("value", s("1,200"))]);
        assert_eq!(value_of(&r), Some(1200.0));
    }

    #[test]
    fn first_present_value_decides() {
        let r = rec(&[("value", s("n/a")), ("Value", CellValue::Integer(5))]);
        assert_eq!(value_of(&r), None);
    }

    #[test]
    fn null_value_lets_next_candidate_through() {
        let r = rec(&[("value", CellValue::Null), ("amount", CellValue::Float(2.5))]);
        assert_eq!(value_of(&r), Some(2.5));
    }

    #[test]
    fn non_finite_value_is_absent() {
        let r = rec(&[("value", CellValue::Float(f64::INFINITY))]);
        assert_eq!(value_of(&r), None);
        let r = rec(&[("value", CellValue::Float(f64::NAN))]);
        assert_eq!(value_of(&r), None);
    }

    #[test]
    fn parse_fields_collects_everything() {
        let r = rec(&[
            ("year", CellValue::Integer(2020)),
            ("sector", s("Power")),
            ("value", CellValue::Float(1.5)),
        ]);
        assert_eq!(
            parse_fields(&r),
            ParsedFields {
                year: Some(2020),
                category: Some("Power".to_string()),
                value: Some(1.5),
            }
        );
    }
}
