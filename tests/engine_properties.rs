use proptest::prelude::*;

use research_dashboard::data::samples::{SampleDataset, SampleTables};
use research_dashboard::data::{
    ColumnType, FilterSpec, Schema, Table, Value, count_by_value, filter_by_keyword,
    filter_by_range, filter_by_threshold,
};

fn column(table: &Table, name: &str) -> Vec<Value> {
    table
        .records()
        .map(|r| r.get(name).cloned().unwrap())
        .collect()
}

fn text(values: &[&str]) -> Vec<Value> {
    values.iter().map(|&s| Value::from(s)).collect()
}

#[test]
fn keyword_search_is_case_insensitive() {
    let samples = SampleTables::load().unwrap();
    let missions = samples.get(SampleDataset::SpaceMissions);
    assert_eq!(filter_by_keyword(missions, "ISS"), filter_by_keyword(missions, "iss"));
}

#[test]
fn keyword_matches_any_column() {
    let schema = Schema::new([
        ("Satellite", ColumnType::Text),
        ("Launch Year", ColumnType::Integer),
    ])
    .unwrap();
    let table = Table::new(
        schema,
        vec![
            vec![Value::from("Hubble"), Value::Integer(1990)],
            vec![Value::from("ISS"), Value::Integer(1998)],
        ],
    )
    .unwrap();
    assert_eq!(column(&filter_by_keyword(&table, "1990"), "Satellite"), text(&["Hubble"]));
}

#[test]
fn altitude_range_is_inclusive() {
    let samples = SampleTables::load().unwrap();
    let missions = samples.get(SampleDataset::SpaceMissions);
    let out = filter_by_range(missions, "Altitude (km)", 400.0, 900.0).unwrap();
    assert_eq!(column(&out, "Satellite"), text(&["ISS", "Hubble", "Starlink", "NOAA-19"]));
}

#[test]
fn accuracy_threshold_includes_boundary() {
    let samples = SampleTables::load().unwrap();
    let experiments = samples.get(SampleDataset::QuantumExperiments);
    let out = filter_by_threshold(experiments, "Accuracy (%)", 87.0).unwrap();
    assert_eq!(
        column(&out, "Accuracy (%)"),
        vec![Value::Integer(91), Value::Integer(87), Value::Integer(94)]
    );
}

#[test]
fn inverted_range_is_empty_not_an_error() {
    let samples = SampleTables::load().unwrap();
    let weather = samples.get(SampleDataset::SouthAfricaWeather);
    let out = filter_by_range(weather, "Temp (°C)", 10.0, 5.0).unwrap();
    assert!(out.is_empty());
    assert_eq!(out.schema(), weather.schema());
}

#[test]
fn unknown_column_is_reported() {
    let samples = SampleTables::load().unwrap();
    let missions = samples.get(SampleDataset::SpaceMissions);
    let err = filter_by_range(missions, "NoSuchColumn", 0.0, 1.0).unwrap_err();
    assert_eq!(err.column, "NoSuchColumn");
    assert!(filter_by_threshold(missions, "NoSuchColumn", 0.0).is_err());
    assert!(count_by_value(missions, "NoSuchColumn").is_err());
}

#[test]
fn filters_are_idempotent() {
    let samples = SampleTables::load().unwrap();
    let spec = FilterSpec::Range {
        column: "Humidity (%)".to_string(),
        low: 45.0,
        high: 65.0,
    };
    let weather = samples.get(SampleDataset::SouthAfricaWeather);
    assert_eq!(spec.apply(weather).unwrap(), spec.apply(weather).unwrap());
}

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (1990i64..2030).prop_map(Value::Integer),
        "[a-zA-Z ]{0,8}".prop_map(Value::Text),
    ]
}

fn two_column_table() -> impl Strategy<Value = Table> {
    prop::collection::vec((cell(), cell()), 0..40).prop_map(|rows| {
        // Coerce generated cells to each column's type.
        let schema = Schema::new([("a", ColumnType::Integer), ("b", ColumnType::Text)]).unwrap();
        let rows = rows
            .into_iter()
            .map(|(a, b)| {
                let a = if matches!(a, Value::Text(_)) { Value::Null } else { a };
                let b = match b {
                    Value::Integer(i) => Value::Text(i.to_string()),
                    other => other,
                };
                vec![a, b]
            })
            .collect();
        Table::new(schema, rows).unwrap()
    })
}

proptest! {
    #[test]
    fn prop_counts_sum_to_row_count(table in two_column_table()) {
        for name in ["a", "b"] {
            let total: usize = count_by_value(&table, name).unwrap().iter().map(|(_, n)| n).sum();
            prop_assert_eq!(total, table.len());
        }
    }

    #[test]
    fn prop_counts_are_strictly_ascending(table in two_column_table()) {
        let counts = count_by_value(&table, "a").unwrap();
        prop_assert!(counts.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn prop_empty_keyword_is_identity(table in two_column_table()) {
        prop_assert_eq!(filter_by_keyword(&table, ""), table);
    }

    #[test]
    fn prop_keyword_result_is_a_subsequence(
        table in two_column_table(),
        keyword in "[a-z0-9]{1,3}",
    ) {
        let out = filter_by_keyword(&table, &keyword);
        let mut rest = table.rows().iter();
        for row in out.rows() {
            prop_assert!(rest.any(|r| r == row));
        }
    }
}
