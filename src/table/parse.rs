use crate::Result;
use crate::table::record::{Record, Value};

use anyhow::bail;

/// Parse delimited text into an ordered sequence of records.
///
/// Expected shape: first non-blank line is the header row, every following
/// line is one record. Fields may be quoted; `""` inside a quoted field is a
/// literal quote; commas inside quotes do not split.
///
/// Example:
/// ClientID,ClientName,PriorityLevel
/// C001,"Acme, Inc.",5
pub fn parse_table(text: &str) -> Result<Vec<Record>> {
    // Uploads arrive with assorted encoding damage; drop a leading BOM and
    // any embedded NUL bytes before splitting into lines.
    let clean = text.trim_start_matches('\u{feff}').replace('\0', "");

    let lines: Vec<&str> = clean.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        bail!("no data found in file");
    }

    // Header tokens get residual quote characters stripped so they can be
    // matched by name downstream.
    let headers: Vec<String> = split_line(lines[0])
        .into_iter()
        .map(|h| h.replace('"', ""))
        .collect();

    let mut out: Vec<Record> = Vec::new();
    for line in &lines[1..] {
        let values = split_line(line);

        let mut row = Record::new();
        for (i, header) in headers.iter().enumerate() {
            // Missing trailing fields read as empty.
            let raw = values.get(i).map(String::as_str).unwrap_or("");
            row.insert(header.clone(), coerce(header, raw));
        }
        out.push(row);
    }

    Ok(out)
}

/// Tokenize one line with a single-pass scanner.
///
/// A naive split on ',' corrupts any field containing a comma, so we track
/// quoting state explicitly: `"` toggles it, a doubled `""` inside quotes is
/// an escaped literal quote, and only an unquoted comma ends a field.
fn split_line(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                out.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    out.push(current.trim().to_string());

    out
}

type HeaderPredicate = fn(&str) -> bool;
type Coercion = fn(&str) -> Value;

/// Ordered (header predicate, coercion) pairs; first match wins.
///
/// Coercion is driven purely by header-name patterns, not a schema registry.
/// That keeps arbitrary/evolving headers working at the cost of being
/// sensitive to column naming.
const COERCIONS: &[(HeaderPredicate, Coercion)] = &[
    (is_string_list_header, coerce_string_list),
    (is_slot_list_header, coerce_slot_list),
    (is_integer_header, coerce_integer),
];

fn coerce(header: &str, raw: &str) -> Value {
    for (applies, apply) in COERCIONS {
        if applies(header) {
            return apply(raw);
        }
    }
    Value::Str(raw.to_string())
}

fn is_string_list_header(header: &str) -> bool {
    header.contains("IDs") || header.contains("Skills") || header.contains("Phases")
}

fn is_slot_list_header(header: &str) -> bool {
    header.contains("Slots")
}

fn is_integer_header(header: &str) -> bool {
    header.contains("Level")
        || header.contains("Duration")
        || header.contains("Load")
        || header.contains("Concurrent")
}

/// Split on ';', trim, drop empty pieces. An empty cell yields an empty list.
fn coerce_string_list(raw: &str) -> Value {
    let items = raw
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    Value::StrList(items)
}

/// Slots cells come in two shapes: a literal array (`[1,2,3]`) or a
/// ';'-separated list. The fallback drops pieces that fail to parse or parse
/// to exactly zero; the zero-drop is kept for compatibility with existing
/// exports even though it swallows a genuine slot 0.
fn coerce_slot_list(raw: &str) -> Value {
    if let Ok(items) = serde_json::from_str::<Vec<i64>>(raw) {
        return Value::IntList(items);
    }
    let items = raw
        .split(';')
        .filter_map(|p| p.trim().parse::<i64>().ok())
        .filter(|n| *n != 0)
        .collect();
    Value::IntList(items)
}

fn coerce_integer(raw: &str) -> Value {
    Value::Int(raw.trim().parse().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quoted_field_keeps_embedded_comma() {
        assert_eq!(split_line(r#""a,b",c"#), vec!["a,b", "c"]);
    }

    #[test]
    fn doubled_quote_is_literal_quote() {
        assert_eq!(split_line(r#""he said ""hi""""#), vec![r#"he said "hi""#]);
    }

    #[test]
    fn unquoted_fields_are_trimmed() {
        assert_eq!(split_line("  a , b ,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_text_is_an_ingestion_failure() {
        assert!(parse_table("").is_err());
        assert!(parse_table("\n  \n\r\n").is_err());
    }

    #[test]
    fn bom_and_nul_bytes_are_stripped() {
        let rows = parse_table("\u{feff}ClientID\nC0\01").unwrap();
        assert_eq!(rows[0]["ClientID"], Value::Str("C01".to_string()));
    }

    #[test]
    fn header_only_input_yields_no_records() {
        let rows = parse_table("TaskID,TaskName").unwrap();
        assert_eq!(rows.len(), 0);
    }

    #[test]
    fn missing_trailing_values_default_to_empty() {
        let rows = parse_table("ClientID,GroupTag\nC01").unwrap();
        assert_eq!(rows[0]["GroupTag"], Value::Str(String::new()));
    }

    #[test]
    fn list_headers_split_on_semicolons() {
        let rows = parse_table("RequiredSkills\nRust; SQL ;;Go").unwrap();
        assert_eq!(
            rows[0]["RequiredSkills"],
            Value::StrList(vec!["Rust".into(), "SQL".into(), "Go".into()])
        );
    }

    #[test]
    fn empty_list_cell_is_an_empty_list() {
        let rows = parse_table("RequestedTaskIDs,GroupTag\n,Enterprise").unwrap();
        assert_eq!(rows[0]["RequestedTaskIDs"], Value::StrList(vec![]));
    }

    #[test]
    fn slots_accept_literal_array_syntax() {
        let rows = parse_table("AvailableSlots\n\"[1,2,3]\"").unwrap();
        assert_eq!(rows[0]["AvailableSlots"], Value::IntList(vec![1, 2, 3]));
    }

    #[test]
    fn slots_fallback_drops_unparsable_and_zero_pieces() {
        let rows = parse_table("AvailableSlots\n1;2;x").unwrap();
        assert_eq!(rows[0]["AvailableSlots"], Value::IntList(vec![1, 2]));

        let rows = parse_table("AvailableSlots\n0;3").unwrap();
        assert_eq!(rows[0]["AvailableSlots"], Value::IntList(vec![3]));
    }

    #[test]
    fn integer_headers_default_to_zero_on_garbage() {
        let rows = parse_table("PriorityLevel,Duration\nhigh,4").unwrap();
        assert_eq!(rows[0]["PriorityLevel"], Value::Int(0));
        assert_eq!(rows[0]["Duration"], Value::Int(4));
    }

    #[test]
    fn coercion_priority_prefers_list_over_integer() {
        // "PhasesLevel" matches both the list and integer predicates; the
        // list rule is checked first.
        let rows = parse_table("PhasesLevel\n1;2").unwrap();
        assert_eq!(
            rows[0]["PhasesLevel"],
            Value::StrList(vec!["1".into(), "2".into()])
        );
    }

    #[test]
    fn quoted_value_with_comma_survives_coercion() {
        let rows = parse_table("ClientName,PriorityLevel\n\"Acme, Inc.\",5").unwrap();
        assert_eq!(rows[0]["ClientName"], Value::Str("Acme, Inc.".to_string()));
        assert_eq!(rows[0]["PriorityLevel"], Value::Int(5));
    }

    #[test]
    fn crlf_lines_parse_like_lf() {
        let rows = parse_table("TaskID\r\nT1\r\nT2\r\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["TaskID"], Value::Str("T2".to_string()));
    }
}
