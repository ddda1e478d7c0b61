//! In-memory result table built from a VOTable document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// VOTable primitive datatypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    Boolean,
    Bit,
    UnsignedByte,
    Short,
    Int,
    Long,
    Char,
    UnicodeChar,
    Float,
    Double,
    FloatComplex,
    DoubleComplex,
}

impl DataType {
    /// Wire name used in the `datatype` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Bit => "bit",
            DataType::UnsignedByte => "unsignedByte",
            DataType::Short => "short",
            DataType::Int => "int",
            DataType::Long => "long",
            DataType::Char => "char",
            DataType::UnicodeChar => "unicodeChar",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::FloatComplex => "floatComplex",
            DataType::DoubleComplex => "doubleComplex",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, DataType::Char | DataType::UnicodeChar)
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(DataType::Boolean),
            "bit" => Ok(DataType::Bit),
            "unsignedByte" => Ok(DataType::UnsignedByte),
            "short" => Ok(DataType::Short),
            "int" => Ok(DataType::Int),
            "long" => Ok(DataType::Long),
            "char" => Ok(DataType::Char),
            "unicodeChar" => Ok(DataType::UnicodeChar),
            "float" => Ok(DataType::Float),
            "double" => Ok(DataType::Double),
            "floatComplex" => Ok(DataType::FloatComplex),
            "doubleComplex" => Ok(DataType::DoubleComplex),
            other => Err(format!("Unknown VOTable datatype: {}", other)),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column description from a `FIELD` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub datatype: DataType,
    pub arraysize: Option<String>,
    pub unit: Option<String>,
    pub ucd: Option<String>,
}

impl Field {
    /// Array-valued columns other than strings are kept as raw text.
    pub fn is_array(&self) -> bool {
        self.arraysize.is_some() && !self.datatype.is_text()
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("--"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

/// An `INFO` element (e.g. `QUERY_STATUS`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub name: String,
    pub value: String,
    /// Element text, typically the error message of a failed query
    pub content: Option<String>,
}

/// Result table parsed from a VOTable document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoTable {
    pub name: Option<String>,
    pub fields: Vec<Field>,
    pub rows: Vec<Vec<Value>>,
    pub infos: Vec<Info>,
}

impl VoTable {
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matched case-insensitively like ADQL identifiers.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .or_else(|| {
                self.fields
                    .iter()
                    .position(|f| f.name.eq_ignore_ascii_case(name))
            })
    }

    /// All cells of one column, in row order. Rows too short to hold the
    /// column are skipped.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(|row| row.get(idx)).collect())
    }

    /// Cell at `row` in column `name`.
    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.column_index(name)?;
        self.rows.get(row)?.get(idx)
    }

    /// The `QUERY_STATUS` info, if the service reported one.
    pub fn query_status(&self) -> Option<&Info> {
        self.infos.iter().find(|i| i.name == "QUERY_STATUS")
    }

    /// Error message when the service flagged the query as failed.
    pub fn query_error(&self) -> Option<String> {
        let status = self.query_status()?;
        if status.value != "ERROR" {
            return None;
        }
        Some(
            status
                .content
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "service reported QUERY_STATUS=ERROR".to_string()),
        )
    }

    /// True when the service truncated the result (`QUERY_STATUS=OVERFLOW`).
    pub fn is_overflow(&self) -> bool {
        self.query_status()
            .map(|s| s.value == "OVERFLOW")
            .unwrap_or(false)
    }
}
