//! StudentRecord and its validating decode

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::error::RecordError;

/// The four opaque score attributes of a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub d: f64,
    pub s: f64,
    pub c: f64,
    pub i: f64,
}

impl Scores {
    pub fn new(d: f64, s: f64, c: f64, i: f64) -> Self {
        Self { d, s, c, i }
    }

    /// Scores as display text, in `d, s, c, i` order
    pub fn cells(&self) -> [String; 4] {
        [
            format_score(self.d),
            format_score(self.s),
            format_score(self.c),
            format_score(self.i),
        ]
    }
}

/// A single student row as stored by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Unique key used by every update and delete
    pub register_number: String,
    pub name: String,
    #[serde(flatten)]
    pub scores: Scores,
    pub assignment: String,
}

impl StudentRecord {
    pub fn new(
        register_number: impl Into<String>,
        name: impl Into<String>,
        scores: Scores,
        assignment: impl Into<String>,
    ) -> Self {
        Self {
            register_number: register_number.into(),
            name: name.into(),
            scores,
            assignment: assignment.into(),
        }
    }
}

/// An element of the fetched array that did not match the record schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    /// Position in the fetched array
    pub index: usize,
    pub reason: String,
}

/// Result of decoding one fetched document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedRecords {
    pub records: Vec<StudentRecord>,
    pub rejected: Vec<RejectedRecord>,
}

impl DecodedRecords {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Decode a fetched document into records.
///
/// The document must be an array. Each element is checked on its own, so one
/// malformed row never hides the rest of the set.
pub fn decode_records(document: Value) -> Result<DecodedRecords, RecordError> {
    let items = match document {
        Value::Array(items) => items,
        other => return Err(RecordError::NotAnArray(json_kind(&other))),
    };

    let mut decoded = DecodedRecords::default();

    for (index, item) in items.iter().enumerate() {
        match decode_one(item) {
            Ok(record) => decoded.records.push(record),
            Err(reason) => decoded.rejected.push(RejectedRecord { index, reason }),
        }
    }

    Ok(decoded)
}

fn decode_one(item: &Value) -> Result<StudentRecord, String> {
    let obj = item
        .as_object()
        .ok_or_else(|| format!("expected an object, got {}", json_kind(item)))?;

    let register_number = match obj.get("registerNumber") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::String(_)) => return Err("registerNumber is empty".to_string()),
        Some(other) => {
            return Err(format!(
                "registerNumber must be a string, got {}",
                json_kind(other)
            ))
        }
        None => return Err("registerNumber is missing".to_string()),
    };

    Ok(StudentRecord {
        register_number,
        name: text_field(obj, "name")?,
        scores: Scores {
            d: score_field(obj, "d")?,
            s: score_field(obj, "s")?,
            c: score_field(obj, "c")?,
            i: score_field(obj, "i")?,
        },
        assignment: text_field(obj, "assignment")?,
    })
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Result<String, String> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(number_text(n)),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(format!("{} must be text, got {}", key, json_kind(other))),
    }
}

fn score_field(obj: &Map<String, Value>, key: &str) -> Result<f64, String> {
    match obj.get(key) {
        // Blank spreadsheet cells arrive as "" or null
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| format!("{} is out of range", key)),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(format!("{} is not a number: {:?}", key, s)),
            }
        }
        Some(other) => Err(format!("{} must be a number, got {}", key, json_kind(other))),
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(format_score).unwrap_or_else(|| n.to_string())
    }
}

/// Render a score the way a spreadsheet shows it: `7` rather than `7.0`
pub fn format_score(value: f64) -> String {
    format!("{}", value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_well_formed() {
        let doc = json!([
            {"registerNumber": "0042", "name": "Asha", "d": 8, "s": 7.5, "c": 9, "i": 6, "assignment": "Essay"},
            {"registerNumber": "0043", "name": "Ravi", "d": 5, "s": 5, "c": 5, "i": 5, "assignment": ""}
        ]);

        let decoded = decode_records(doc).unwrap();

        assert!(decoded.is_clean());
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.records[0].register_number, "0042");
        assert_eq!(decoded.records[0].scores, Scores::new(8.0, 7.5, 9.0, 6.0));
        assert_eq!(decoded.records[1].name, "Ravi");
    }

    #[test]
    fn test_decode_spreadsheet_quirks() {
        // Numeric keys, blank cells and numeric strings all come back from sheets
        let doc = json!([
            {"registerNumber": 2021001, "name": "Meera", "d": "", "s": "4", "c": null, "i": " 3.5 "}
        ]);

        let decoded = decode_records(doc).unwrap();
        let record = &decoded.records[0];

        assert_eq!(record.register_number, "2021001");
        assert_eq!(record.scores, Scores::new(0.0, 4.0, 0.0, 3.5));
        assert_eq!(record.assignment, "");
    }

    #[test]
    fn test_decode_rejects_bad_rows_only() {
        let doc = json!([
            {"registerNumber": "1", "name": "Ok", "d": 1, "s": 1, "c": 1, "i": 1, "assignment": ""},
            {"name": "No key", "d": 1},
            {"registerNumber": "3", "name": "Bad score", "d": "ten"},
            "not a record"
        ]);

        let decoded = decode_records(doc).unwrap();

        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.rejected.len(), 3);
        assert_eq!(decoded.rejected[0].index, 1);
        assert!(decoded.rejected[0].reason.contains("registerNumber"));
        assert_eq!(decoded.rejected[1].index, 2);
        assert!(decoded.rejected[1].reason.contains("d is not a number"));
        assert_eq!(decoded.rejected[2].index, 3);
    }

    #[test]
    fn test_decode_not_an_array() {
        let err = decode_records(json!({"error": "Script function not found"})).unwrap_err();
        assert_eq!(err, RecordError::NotAnArray("an object"));
    }

    #[test]
    fn test_serialize_matches_gateway_shape() {
        let record = StudentRecord::new("7", "Lin", Scores::new(1.0, 2.0, 3.0, 4.0), "Lab");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["registerNumber"], "7");
        assert_eq!(value["d"], 1.0);
        assert_eq!(value["assignment"], "Lab");
        assert!(value.get("scores").is_none());
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(7.0), "7");
        assert_eq!(format_score(7.5), "7.5");
        assert_eq!(format_score(0.0), "0");
    }
}
