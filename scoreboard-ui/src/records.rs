//! Student Records
//!
//! Record shape, validating decode of the fetched array, and the raw form
//! with its coercion into write bodies. Kept in step with the `scoreboard`
//! library, which cannot be linked into the WASM build.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Number, Value};

/// One student's row in the sheet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub register_number: String,
    pub name: String,
    pub d: f64,
    pub s: f64,
    pub c: f64,
    pub i: f64,
    pub assignment: String,
}

impl StudentRecord {
    /// Score cells as displayed, `7` rather than `7.0`
    pub fn score_cells(&self) -> [String; 4] {
        [self.d, self.s, self.c, self.i].map(|v| v.to_string())
    }
}

/// A fetched element that failed validation
#[derive(Clone, Debug, PartialEq)]
pub struct RejectedRow {
    pub index: usize,
    pub reason: String,
}

/// Valid records in gateway order plus the rejected elements
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Decoded {
    pub records: Vec<StudentRecord>,
    pub rejected: Vec<RejectedRow>,
}

/// Decode the GET body. Anything but an array is an error; inside the array,
/// bad elements are set aside one by one.
pub fn decode_records(document: Value) -> Result<Decoded, String> {
    let items = match document {
        Value::Array(items) => items,
        other => return Err(format!("expected an array of records, got {}", kind(&other))),
    };

    let mut decoded = Decoded::default();
    for (index, item) in items.iter().enumerate() {
        match decode_one(item) {
            Ok(record) => decoded.records.push(record),
            Err(reason) => decoded.rejected.push(RejectedRow { index, reason }),
        }
    }
    Ok(decoded)
}

fn decode_one(item: &Value) -> Result<StudentRecord, String> {
    let obj = item
        .as_object()
        .ok_or_else(|| format!("expected an object, got {}", kind(item)))?;

    let register_number = match obj.get("registerNumber") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::String(_)) => return Err("registerNumber is empty".to_string()),
        Some(other) => return Err(format!("registerNumber must be a string, got {}", kind(other))),
        None => return Err("registerNumber is missing".to_string()),
    };

    Ok(StudentRecord {
        register_number,
        name: text(obj, "name")?,
        d: score(obj, "d")?,
        s: score(obj, "s")?,
        c: score(obj, "c")?,
        i: score(obj, "i")?,
        assignment: text(obj, "assignment")?,
    })
}

fn text(obj: &Map<String, Value>, key: &str) -> Result<String, String> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(number_text(n)),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(format!("{} must be text, got {}", key, kind(other))),
    }
}

fn score(obj: &Map<String, Value>, key: &str) -> Result<f64, String> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| format!("{} is out of range", key)),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(format!("{} is not a number: {:?}", key, s)),
        },
        Some(other) => Err(format!("{} must be a number, got {}", key, kind(other))),
    }
}

fn number_text(n: &Number) -> String {
    match (n.as_i64(), n.as_u64(), n.as_f64()) {
        (Some(i), _, _) => i.to_string(),
        (_, Some(u), _) => u.to_string(),
        (_, _, Some(f)) => f.to_string(),
        _ => n.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Form inputs in display order: wire name and placeholder
pub const FORM_FIELDS: [(&str, &str); 7] = [
    ("registerNumber", "Register No"),
    ("name", "Name"),
    ("d", "D"),
    ("s", "S"),
    ("c", "C"),
    ("i", "I"),
    ("assignment", "Assignment"),
];

/// Raw text of every form input
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordForm {
    pub register_number: String,
    pub name: String,
    pub d: String,
    pub s: String,
    pub c: String,
    pub i: String,
    pub assignment: String,
}

impl RecordForm {
    /// Store input under its wire name; unknown names are ignored
    pub fn set(&mut self, name: &str, value: String) {
        match name {
            "registerNumber" => self.register_number = value,
            "name" => self.name = value,
            "d" => self.d = value,
            "s" => self.s = value,
            "c" => self.c = value,
            "i" => self.i = value,
            "assignment" => self.assignment = value,
            _ => {}
        }
    }

    fn scores(&self) -> Result<[f64; 4], String> {
        Ok([
            coerce("d", &self.d)?,
            coerce("s", &self.s)?,
            coerce("c", &self.c)?,
            coerce("i", &self.i)?,
        ])
    }

    pub fn create_body(&self) -> Result<Value, String> {
        let [d, s, c, i] = self.scores()?;
        Ok(json!({
            "action": "create",
            "registerNumber": self.register_number,
            "name": self.name,
            "d": d, "s": s, "c": c, "i": i,
        }))
    }

    /// Never carries name or assignment
    pub fn update_score_body(&self) -> Result<Value, String> {
        let [d, s, c, i] = self.scores()?;
        Ok(json!({
            "action": "updateScore",
            "registerNumber": self.register_number,
            "d": d, "s": s, "c": c, "i": i,
        }))
    }

    pub fn update_assignment_body(&self) -> Value {
        json!({
            "action": "updateAssignment",
            "registerNumber": self.register_number,
            "assignment": self.assignment,
        })
    }
}

pub fn delete_body(register_number: &str) -> Value {
    json!({ "action": "delete", "registerNumber": register_number })
}

fn coerce(field: &str, raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("{} must be a number, got {:?}", field.to_uppercase(), raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_mixed_rows() {
        let doc = json!([
            {"registerNumber": "0042", "name": "Asha", "d": 8, "s": "7.5", "c": "", "i": null, "assignment": "Essay"},
            {"name": "No key"},
            {"registerNumber": 107, "name": "Lin", "d": 1, "s": 2, "c": 3, "i": 4, "assignment": ""},
            "junk"
        ]);

        let decoded = decode_records(doc).unwrap();
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.records[0].s, 7.5);
        assert_eq!(decoded.records[0].c, 0.0);
        assert_eq!(decoded.records[0].i, 0.0);
        assert_eq!(decoded.records[1].register_number, "107");

        let indexes: Vec<usize> = decoded.rejected.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![1, 3]);
    }

    #[test]
    fn test_decode_requires_array() {
        assert!(decode_records(json!({"error": "quota"})).is_err());
    }

    #[test]
    fn test_blank_scores_are_zero() {
        let mut form = RecordForm::default();
        form.set("registerNumber", "9".to_string());
        form.set("d", "5".to_string());

        let body = form.update_score_body().unwrap();
        assert_eq!(body["d"], 5.0);
        assert_eq!(body["s"], 0.0);
        assert!(body.get("name").is_none());
        assert!(body.get("assignment").is_none());
    }

    #[test]
    fn test_bad_score_text_is_rejected() {
        let mut form = RecordForm::default();
        form.set("c", "ten".to_string());
        assert!(form.create_body().is_err());
    }

    #[test]
    fn test_score_cells() {
        let record = StudentRecord {
            register_number: "1".into(),
            name: "A".into(),
            d: 7.0,
            s: 7.5,
            c: 0.0,
            i: 10.0,
            assignment: String::new(),
        };
        assert_eq!(record.score_cells(), ["7", "7.5", "0", "10"]);
    }
}
