use std::collections::BTreeMap;

/// A coerced cell value. The parser decides the variant from the header name,
/// so a record can mix scalars and lists freely.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    StrList(Vec<String>),
    IntList(Vec<i64>),
}

/// One parsed row, keyed by header name. Replaced wholesale on re-upload.
pub type Record = BTreeMap<String, Value>;

impl Value {
    /// Scalar string view; non-string variants read as empty.
    pub fn as_str(&self) -> &str {
        match self {
            Value::Str(s) => s,
            _ => "",
        }
    }

    /// Scalar integer view; strings are parsed, everything else reads as 0.
    pub fn as_int(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            Value::Str(s) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// String-list view; non-list variants read as empty.
    pub fn as_str_list(&self) -> Vec<String> {
        match self {
            Value::StrList(items) => items.clone(),
            _ => Vec::new(),
        }
    }

    /// Integer-list view. A string list is reinterpreted piecewise, dropping
    /// pieces that do not parse (covers headers like PreferredPhases, which
    /// the coercion table types as strings).
    pub fn as_int_list(&self) -> Vec<i64> {
        match self {
            Value::IntList(items) => items.clone(),
            Value::StrList(items) => items
                .iter()
                .filter_map(|p| p.trim().parse().ok())
                .collect(),
            _ => Vec::new(),
        }
    }
}
