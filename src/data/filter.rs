use super::model::{ColumnNotFoundError, Table};

// ---------------------------------------------------------------------------
// Row-retention predicates
// ---------------------------------------------------------------------------

/// Declarative description of a row filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    /// Case-insensitive substring match against every field.
    Keyword(String),
    /// `low <= column <= high`.
    Range { column: String, low: f64, high: f64 },
    /// `column >= minimum`.
    Threshold { column: String, minimum: f64 },
}

impl FilterSpec {
    pub fn apply(&self, table: &Table) -> Result<Table, ColumnNotFoundError> {
        match self {
            FilterSpec::Keyword(keyword) => Ok(filter_by_keyword(table, keyword)),
            FilterSpec::Range { column, low, high } => filter_by_range(table, column, *low, *high),
            FilterSpec::Threshold { column, minimum } => {
                filter_by_threshold(table, column, *minimum)
            }
        }
    }
}

/// Keep rows where `keyword` (case-folded) occurs in the display string of
/// any field. An empty keyword returns the table unchanged.
pub fn filter_by_keyword(table: &Table, keyword: &str) -> Table {
    if keyword.is_empty() {
        return table.clone();
    }
    let needle = keyword.to_lowercase();
    table.retain(|row| {
        row.iter()
            .any(|value| value.to_string().to_lowercase().contains(&needle))
    })
}

/// Keep rows where `low <= row[column] <= high`. Inverted bounds keep nothing,
/// and so do text, date, bool and null cells.
pub fn filter_by_range(
    table: &Table,
    column: &str,
    low: f64,
    high: f64,
) -> Result<Table, ColumnNotFoundError> {
    let idx = table.schema().index_of(column)?;
    Ok(table.retain(|row| row[idx].as_f64().is_some_and(|v| low <= v && v <= high)))
}

/// Keep rows where `row[column] >= minimum`.
pub fn filter_by_threshold(
    table: &Table,
    column: &str,
    minimum: f64,
) -> Result<Table, ColumnNotFoundError> {
    let idx = table.schema().index_of(column)?;
    Ok(table.retain(|row| row[idx].as_f64().is_some_and(|v| v >= minimum)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ColumnType, Schema};

    fn missions() -> Table {
        let schema = Schema::new([
            ("Satellite", ColumnType::Text),
            ("Altitude (km)", ColumnType::Integer),
            ("Launch Year", ColumnType::Integer),
        ])
        .unwrap();
        Table::parse(
            schema,
            [
                ["ISS", "408", "1998"],
                ["Hubble", "547", "1990"],
                ["JWST", "1500000", "2021"],
                ["Starlink", "550", "2019"],
                ["NOAA-19", "870", "2009"],
            ],
        )
        .unwrap()
    }

    fn names(table: &Table) -> Vec<String> {
        table
            .records()
            .map(|r| r.get("Satellite").unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_keyword_empty_is_identity() {
        let t = missions();
        assert_eq!(filter_by_keyword(&t, ""), t);
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let t = missions();
        let upper = filter_by_keyword(&t, "ISS");
        let lower = filter_by_keyword(&t, "iss");
        assert_eq!(upper, lower);
        assert_eq!(names(&upper), vec!["ISS"]);
    }

    #[test]
    fn test_keyword_matches_numeric_fields() {
        let t = missions();
        assert_eq!(names(&filter_by_keyword(&t, "1990")), vec!["Hubble"]);
        // "55" is a substring of Starlink's altitude only.
        assert_eq!(names(&filter_by_keyword(&t, "55")), vec!["Starlink"]);
    }

    #[test]
    fn test_keyword_preserves_schema_when_nothing_matches() {
        let t = missions();
        let out = filter_by_keyword(&t, "voyager");
        assert!(out.is_empty());
        assert_eq!(out.schema(), t.schema());
    }

    #[test]
    fn test_keyword_matches_iso_dates() {
        let schema = Schema::new([("Date", ColumnType::Date)]).unwrap();
        let t = Table::parse(schema, [["2024-01-01"], ["2024-02-01"]]).unwrap();
        assert_eq!(filter_by_keyword(&t, "-02-").len(), 1);
    }

    #[test]
    fn test_range_is_inclusive() {
        let out = filter_by_range(&missions(), "Altitude (km)", 408.0, 870.0).unwrap();
        assert_eq!(names(&out), vec!["ISS", "Hubble", "Starlink", "NOAA-19"]);
    }

    #[test]
    fn test_range_inverted_bounds_is_empty() {
        let out = filter_by_range(&missions(), "Altitude (km)", 10.0, 5.0).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_range_unknown_column() {
        let err = filter_by_range(&missions(), "NoSuchColumn", 0.0, 1.0).unwrap_err();
        assert_eq!(err.column, "NoSuchColumn");
    }

    #[test]
    fn test_range_skips_non_numeric_values() {
        let out = filter_by_range(&missions(), "Satellite", f64::MIN, f64::MAX).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let out = filter_by_threshold(&missions(), "Launch Year", 2009.0).unwrap();
        assert_eq!(names(&out), vec!["JWST", "Starlink", "NOAA-19"]);
    }

    #[test]
    fn test_threshold_ignores_nulls() {
        let schema = Schema::new([("v", ColumnType::Float)]).unwrap();
        let t = Table::parse(schema, [["1.5"], [""], ["NaN"]]).unwrap();
        assert_eq!(filter_by_threshold(&t, "v", 0.0).unwrap().len(), 1);
    }

    #[test]
    fn test_filter_spec_dispatch() {
        let t = missions();
        let spec = FilterSpec::Threshold {
            column: "Altitude (km)".to_string(),
            minimum: 1000.0,
        };
        assert_eq!(names(&spec.apply(&t).unwrap()), vec!["JWST"]);
        assert_eq!(FilterSpec::Keyword(String::new()).apply(&t).unwrap(), t);
    }
}
