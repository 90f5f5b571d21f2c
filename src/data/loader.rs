use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Float32Type, Float64Type, Int32Type, Int64Type, TimeUnit,
    TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{ColumnType, Schema, Table, Value};

/// Column types declared up front; any column not listed is inferred.
pub type ColumnTypes = BTreeMap<String, ColumnType>;

/// Column the research-activity chart groups by.
pub const YEAR_COLUMN: &str = "Year";

/// Inference tries these in order; the first type every cell parses as wins.
const INFERENCE_ORDER: [ColumnType; 4] = [
    ColumnType::Integer,
    ColumnType::Float,
    ColumnType::Bool,
    ColumnType::Date,
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a projects/publications table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with column names, one record per line
/// * `.json`    – `[{ "Title": "...", "Year": 2023, ... }, ...]`
/// * `.parquet` – flat columns of strings, integers, floats, bools or dates
pub fn load_file(path: &Path, declared: &ColumnTypes) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file, declared)?
        }
        "json" => load_json(path, declared)?,
        "parquet" | "pq" => load_parquet(path, declared)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    check_year_column(&table);
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV text (header row first) into a typed table.
pub fn read_csv<R: Read>(reader: R, declared: &ColumnTypes) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    text_table(headers, rows, declared)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Columns are taken in key order of the parsed objects; a key missing from a
/// record becomes a null cell.
fn load_json(path: &Path, declared: &ColumnTypes) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_text).unwrap_or_default())
                .collect()
        })
        .collect();

    text_table(headers, rows, declared)
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Type inference over textual cells
// ---------------------------------------------------------------------------

fn text_table(
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    declared: &ColumnTypes,
) -> Result<Table> {
    let columns: Vec<(String, ColumnType)> = headers
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let ty = declared
                .get(&name)
                .copied()
                .unwrap_or_else(|| infer_type(rows.iter().map(|r| r[idx].as_str())));
            (name, ty)
        })
        .collect();

    let schema = Schema::new(columns).context("building schema")?;
    let table = Table::parse(schema, rows).context("parsing cells")?;
    log::debug!(
        "parsed {} rows, schema {:?}",
        table.len(),
        table.schema().columns()
    );
    Ok(table)
}

/// Most specific type that every non-empty cell parses as. An all-empty
/// column is text.
pub fn infer_type<'a>(cells: impl Iterator<Item = &'a str> + Clone) -> ColumnType {
    let mut non_empty = cells.filter(|c| !c.trim().is_empty()).peekable();
    if non_empty.peek().is_none() {
        return ColumnType::Text;
    }
    INFERENCE_ORDER
        .into_iter()
        .find(|ty| non_empty.clone().all(|c| ty.parse(c).is_some()))
        .unwrap_or(ColumnType::Text)
}

fn check_year_column(table: &Table) {
    if let Some(ty) = table.schema().column_type(YEAR_COLUMN) {
        if ty != ColumnType::Integer {
            log::warn!("'{YEAR_COLUMN}' column is {ty}, year trends will group by {ty} values");
        }
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat scalar columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Timestamp columns (pandas
/// `datetime64`) are read as dates, dropping the time of day.
fn load_parquet(path: &Path, declared: &ColumnTypes) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let columns: Vec<(String, ColumnType)> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| -> Result<(String, ColumnType)> {
            let ty = arrow_column_type(f.data_type())
                .with_context(|| format!("column '{}'", f.name()))?;
            if let Some(&want) = declared.get(f.name()) {
                if want != ty {
                    bail!("column '{}' is declared {want} but stored as {ty}", f.name());
                }
            }
            Ok((f.name().clone(), ty))
        })
        .collect::<Result<_>>()?;
    let schema = Schema::new(columns).context("building schema")?;

    let reader = builder.build().context("building parquet reader")?;
    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_value(col, row))
                    .collect(),
            );
        }
    }

    Table::new(schema, rows).context("assembling parquet table")
}

fn arrow_column_type(data_type: &DataType) -> Result<ColumnType> {
    Ok(match data_type {
        DataType::Utf8 | DataType::LargeUtf8 => ColumnType::Text,
        DataType::Int32 | DataType::Int64 => ColumnType::Integer,
        DataType::Float32 | DataType::Float64 => ColumnType::Float,
        DataType::Boolean => ColumnType::Bool,
        DataType::Date32 | DataType::Timestamp(_, _) => ColumnType::Date,
        other => bail!("unsupported parquet column type {other:?}"),
    })
}

/// Extract a single cell from an Arrow column whose type passed
/// [`arrow_column_type`].
fn extract_value(col: &Arc<dyn Array>, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Null;
    }
    match col.data_type() {
        DataType::Utf8 => Value::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Value::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Value::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Value::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Value::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Value::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Value::Bool(col.as_boolean().value(row)),
        DataType::Date32 => col
            .as_primitive::<Date32Type>()
            .value_as_date(row)
            .map(Value::Date)
            .unwrap_or(Value::Null),
        DataType::Timestamp(unit, _) => {
            let date = match unit {
                TimeUnit::Second => col.as_primitive::<TimestampSecondType>().value_as_date(row),
                TimeUnit::Millisecond => {
                    col.as_primitive::<TimestampMillisecondType>().value_as_date(row)
                }
                TimeUnit::Microsecond => {
                    col.as_primitive::<TimestampMicrosecondType>().value_as_date(row)
                }
                TimeUnit::Nanosecond => {
                    col.as_primitive::<TimestampNanosecondType>().value_as_date(row)
                }
            };
            date.map(Value::Date).unwrap_or(Value::Null)
        }
        _ => Value::Null,
    }
}
