//! Delimited-text layer: raw uploaded text in, typed records out.
//!
//! This module is intentionally separate from the domain entities and the
//! validator. It owns:
//! - Value type (tagged coerced cell value)
//! - Record type (one parsed row, header -> value)
//! - the CSV parser with quote handling and header-driven coercion

pub mod parse;
pub mod record;

pub use parse::parse_table;
pub use record::{Record, Value};
