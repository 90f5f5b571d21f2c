use std::collections::BTreeMap;

use super::model::{ColumnNotFoundError, Table, Value};

/// Count rows per distinct value of `column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationSpec {
    pub column: String,
}

impl AggregationSpec {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    pub fn apply(&self, table: &Table) -> Result<Vec<(Value, usize)>, ColumnNotFoundError> {
        count_by_value(table, &self.column)
    }
}

/// Group rows by exact value equality on `column` and count each group.
/// Pairs are ordered by ascending value; nulls form their own (first) group,
/// so the counts always sum to `table.len()`.
pub fn count_by_value(
    table: &Table,
    column: &str,
) -> Result<Vec<(Value, usize)>, ColumnNotFoundError> {
    let idx = table.schema().index_of(column)?;
    let mut counts: BTreeMap<&Value, usize> = BTreeMap::new();
    for row in table.rows() {
        *counts.entry(&row[idx]).or_default() += 1;
    }
    Ok(counts
        .into_iter()
        .map(|(value, n)| (value.clone(), n))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ColumnType, Schema};

    fn projects() -> Table {
        let schema = Schema::new([("Title", ColumnType::Text), ("Year", ColumnType::Integer)])
            .unwrap();
        Table::parse(
            schema,
            [
                ["Pulsar timing", "2023"],
                ["Solar wind", "2021"],
                ["Dark matter", "2023"],
                ["Untitled", ""],
                ["Qubits", "2022"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_counts_are_sorted_by_value() {
        let counts = count_by_value(&projects(), "Year").unwrap();
        assert_eq!(
            counts,
            vec![
                (Value::Null, 1),
                (Value::Integer(2021), 1),
                (Value::Integer(2022), 1),
                (Value::Integer(2023), 2),
            ]
        );
    }

    #[test]
    fn test_counts_sum_to_row_count() {
        let t = projects();
        let total: usize = count_by_value(&t, "Title").unwrap().iter().map(|(_, n)| n).sum();
        assert_eq!(total, t.len());
    }

    #[test]
    fn test_signed_zeros_share_a_group() {
        let schema = Schema::new([("Offset", ColumnType::Float)]).unwrap();
        let t = Table::parse(schema, [["0.0"], ["-0.0"], ["1.5"]]).unwrap();
        let counts = count_by_value(&t, "Offset").unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].1, 2);
        assert_eq!(counts[1], (Value::Float(1.5), 1));
    }

    #[test]
    fn test_empty_table_gives_no_groups() {
        let t = Table::empty(projects().schema().clone());
        assert!(count_by_value(&t, "Year").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_column() {
        let err = AggregationSpec::new("Decade").apply(&projects()).unwrap_err();
        assert_eq!(err.column, "Decade");
    }
}
