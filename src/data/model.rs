use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date formats accepted when parsing a `Date` cell; the first one is also the
/// display format.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A filter or aggregation referenced a column the table does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column not found: '{column}'")]
pub struct ColumnNotFoundError {
    pub column: String,
}

/// Raised while building a [`Schema`] or [`Table`], i.e. at load time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("row {row}: expected {expected} values, found {found}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        row: usize,
        column: String,
        expected: ColumnType,
        found: &'static str,
    },

    #[error("row {row}, column '{column}': '{text}' is not a valid {expected}")]
    InvalidCell {
        row: usize,
        column: String,
        expected: ColumnType,
        text: String,
    },
}

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A typed cell value.
///
/// Equality and ordering agree (`Float` compares by IEEE total order after
/// folding `-0.0` into `0.0` and every NaN into one), so values can key a
/// `BTreeMap` and tables compare reflexively.
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Null,
}

impl Value {
    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Integer(_) => 2,
            Value::Float(_) => 3,
            Value::Date(_) => 4,
            Value::Text(_) => 5,
        }
    }

    /// `-0.0` and `0.0` are one value, and so are all NaNs.
    fn canonical_float(v: f64) -> f64 {
        if v == 0.0 {
            0.0
        } else if v.is_nan() {
            f64::NAN
        } else {
            v
        }
    }

    /// Name of the value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Date(_) => "date",
            Value::Null => "null",
        }
    }

    /// Numeric view used by range and threshold filters.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether a non-null value may live in a column of type `ty`.
    pub fn fits(&self, ty: ColumnType) -> bool {
        matches!(
            (self, ty),
            (Value::Null, _)
                | (Value::Text(_), ColumnType::Text)
                | (Value::Integer(_), ColumnType::Integer)
                | (Value::Float(_), ColumnType::Float)
                | (Value::Bool(_), ColumnType::Bool)
                | (Value::Date(_), ColumnType::Date)
        )
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => {
                Self::canonical_float(*a).total_cmp(&Self::canonical_float(*b))
            }
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Text(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => Self::canonical_float(*f).to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Date(d) => d.hash(state),
            Value::Null => {}
        }
    }
}

/// The display string is what keyword search matches against.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMATS[0])),
            Value::Null => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

// ---------------------------------------------------------------------------
// ColumnType / Schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Integer,
    Float,
    Bool,
    Date,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Bool => "bool",
            ColumnType::Date => "date",
        };
        f.write_str(name)
    }
}

impl ColumnType {
    /// Parse one textual cell as this type. An empty cell is `Null`; for
    /// non-text types so is a whitespace-only one.
    pub fn parse(self, text: &str) -> Option<Value> {
        let t = text.trim();
        if text.is_empty() || (t.is_empty() && self != ColumnType::Text) {
            return Some(Value::Null);
        }
        match self {
            ColumnType::Text => Some(Value::Text(text.to_string())),
            ColumnType::Integer => t.parse::<i64>().ok().map(Value::Integer),
            ColumnType::Float => t.parse::<f64>().ok().map(Value::Float),
            ColumnType::Bool => {
                if t.eq_ignore_ascii_case("true") {
                    Some(Value::Bool(true))
                } else if t.eq_ignore_ascii_case("false") {
                    Some(Value::Bool(false))
                } else {
                    None
                }
            }
            ColumnType::Date => DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(t, fmt).ok())
                .map(Value::Date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: ColumnType,
}

/// Ordered, uniquely named column declarations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    columns: Vec<ColumnDef>,
}

impl Schema {
    pub fn new<I, S>(columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (S, ColumnType)>,
        S: Into<String>,
    {
        let mut defs: Vec<ColumnDef> = Vec::new();
        for (name, ty) in columns {
            let name = name.into();
            if defs.iter().any(|d| d.name == name) {
                return Err(SchemaError::DuplicateColumn(name));
            }
            defs.push(ColumnDef { name, ty });
        }
        Ok(Schema { columns: defs })
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn index_of(&self, name: &str) -> Result<usize, ColumnNotFoundError> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| ColumnNotFoundError {
                column: name.to_string(),
            })
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.ty)
    }
}

// ---------------------------------------------------------------------------
// Table / Record
// ---------------------------------------------------------------------------

/// Immutable, typed in-memory table. Every row has one value per column and
/// every non-null value matches its column type.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Schema,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table, checking row widths and value types.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Result<Self, SchemaError> {
        for (r, row) in rows.iter().enumerate() {
            if row.len() != schema.len() {
                return Err(SchemaError::RowWidth {
                    row: r,
                    expected: schema.len(),
                    found: row.len(),
                });
            }
            for (value, col) in row.iter().zip(schema.columns()) {
                if !value.fits(col.ty) {
                    return Err(SchemaError::TypeMismatch {
                        row: r,
                        column: col.name.clone(),
                        expected: col.ty,
                        found: value.kind(),
                    });
                }
            }
        }
        Ok(Table { schema, rows })
    }

    /// Build a table from textual cells, parsing each one by its column type.
    pub fn parse<R, S>(schema: Schema, rows: R) -> Result<Self, SchemaError>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for (r, row) in rows.into_iter().enumerate() {
            let cells: Vec<S> = row.into_iter().collect();
            if cells.len() != schema.len() {
                return Err(SchemaError::RowWidth {
                    row: r,
                    expected: schema.len(),
                    found: cells.len(),
                });
            }
            let mut values = Vec::with_capacity(cells.len());
            for (cell, col) in cells.iter().zip(schema.columns()) {
                let text = cell.as_ref();
                let value = col.ty.parse(text).ok_or_else(|| SchemaError::InvalidCell {
                    row: r,
                    column: col.name.clone(),
                    expected: col.ty,
                    text: text.to_string(),
                })?;
                values.push(value);
            }
            parsed.push(values);
        }
        Ok(Table {
            schema,
            rows: parsed,
        })
    }

    /// A table with the same schema and no rows.
    pub fn empty(schema: Schema) -> Self {
        Table {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.schema.names().collect()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        self.rows.get(index).map(|values| Record {
            schema: &self.schema,
            values,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|values| Record {
            schema: &self.schema,
            values,
        })
    }

    /// Copy of the rows matching `keep`, same schema, order preserved.
    pub(crate) fn retain<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&[Value]) -> bool,
    {
        Table {
            schema: self.schema.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row))
                .cloned()
                .collect(),
        }
    }
}

/// One row of a [`Table`].
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    schema: &'a Schema,
    values: &'a [Value],
}

impl<'a> Record<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let idx = self.schema.index_of(column).ok()?;
        self.values.get(idx)
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }
}
