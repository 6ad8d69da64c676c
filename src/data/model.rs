use std::collections::BTreeSet;
use std::fmt;

use super::error::LoadError;

// ---------------------------------------------------------------------------
// Value – a single cell of the dataset
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the common survey column dtypes.
/// Used as a category key downstream, so `Value` must be `Ord` and `Hash`.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

// -- Manual Eq/Ord/Hash so we can put Value in BTreeSet and HashMap --

/// `0.0` and `-0.0` are the same category.
fn float_key(f: f64) -> f64 {
    if f == 0.0 {
        0.0
    } else {
        f
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => float_key(*a).total_cmp(&float_key(*b)),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Text(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => float_key(*f).to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Numeric view of the cell. Missing cells (null or NaN) yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) if !v.is_nan() => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Null and NaN both count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// The uniform type of a column after loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Integers and/or floats. An all-missing column is numeric too.
    Numeric,
    Boolean,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Boolean => write!(f, "boolean"),
            ColumnKind::Text => write!(f, "text"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed survey table. Rows are stored in file order and cells in
/// column order. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Validate the shape of the loaded rows and settle each column's kind.
    ///
    /// * column names must be unique
    /// * every row must have one cell per column
    /// * a column holding any float stores all its numbers as floats
    /// * a column mixing text with other scalars becomes a text column
    pub fn from_rows(names: Vec<String>, mut rows: Vec<Vec<Value>>) -> Result<Self, LoadError> {
        let mut seen = BTreeSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(LoadError::DuplicateColumn {
                    column: name.clone(),
                });
            }
        }

        for (row_no, row) in rows.iter().enumerate() {
            if row.len() != names.len() {
                return Err(LoadError::RaggedRow {
                    row: row_no,
                    expected: names.len(),
                    found: row.len(),
                });
            }
        }

        let columns = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let kind = unify_column(&mut rows, idx);
                Column { name, kind }
            })
            .collect();

        Ok(Dataset { columns, rows })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Position of a column by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// All cells of the column at `idx`, in row order.
    pub fn cells(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }

    pub fn row(&self, row: usize) -> Option<&[Value]> {
        self.rows.get(row).map(|r| r.as_slice())
    }
}

/// Settle the kind of column `idx`, rewriting cells where needed.
fn unify_column(rows: &mut [Vec<Value>], idx: usize) -> ColumnKind {
    let (mut any_int, mut any_float, mut any_bool, mut any_text) = (false, false, false, false);
    for row in rows.iter() {
        match &row[idx] {
            Value::Integer(_) => any_int = true,
            Value::Float(_) => any_float = true,
            Value::Bool(_) => any_bool = true,
            Value::Text(_) => any_text = true,
            Value::Null => {}
        }
    }

    let numeric = any_int || any_float;
    if any_text || (any_bool && numeric) {
        for row in rows.iter_mut() {
            let cell = &mut row[idx];
            if !matches!(cell, Value::Text(_)) && !cell.is_missing() {
                *cell = Value::Text(cell.to_string());
            }
        }
        return ColumnKind::Text;
    }
    if any_bool {
        return ColumnKind::Boolean;
    }
    if any_int && any_float {
        for row in rows.iter_mut() {
            if let Value::Integer(i) = row[idx] {
                row[idx] = Value::Float(i as f64);
            }
        }
    }
    ColumnKind::Numeric
}
