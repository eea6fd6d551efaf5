//! Write requests understood by the gateway

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::Scores;

/// One write request.
///
/// Serializes to the flat body the gateway expects, with the variant name in
/// the `action` field:
///
/// ```json
/// {"action": "updateScore", "registerNumber": "0042", "d": 8, "s": 7, "c": 9, "i": 6}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Mutation {
    #[serde(rename_all = "camelCase")]
    Create {
        register_number: String,
        name: String,
        #[serde(flatten)]
        scores: Scores,
    },
    #[serde(rename_all = "camelCase")]
    UpdateScore {
        register_number: String,
        #[serde(flatten)]
        scores: Scores,
    },
    #[serde(rename_all = "camelCase")]
    UpdateAssignment {
        register_number: String,
        assignment: String,
    },
    #[serde(rename_all = "camelCase")]
    Delete { register_number: String },
}

/// The `action` discriminator on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    UpdateScore,
    UpdateAssignment,
    Delete,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::UpdateScore => "updateScore",
            MutationKind::UpdateAssignment => "updateAssignment",
            MutationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Mutation {
    pub fn delete(register_number: impl Into<String>) -> Self {
        Mutation::Delete {
            register_number: register_number.into(),
        }
    }

    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Create { .. } => MutationKind::Create,
            Mutation::UpdateScore { .. } => MutationKind::UpdateScore,
            Mutation::UpdateAssignment { .. } => MutationKind::UpdateAssignment,
            Mutation::Delete { .. } => MutationKind::Delete,
        }
    }

    /// Key of the record this mutation targets
    pub fn register_number(&self) -> &str {
        match self {
            Mutation::Create {
                register_number, ..
            }
            | Mutation::UpdateScore {
                register_number, ..
            }
            | Mutation::UpdateAssignment {
                register_number, ..
            }
            | Mutation::Delete { register_number } => register_number,
        }
    }

    /// Request body text
    pub fn to_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_create_body() {
        let m = Mutation::Create {
            register_number: "0042".to_string(),
            name: "Asha".to_string(),
            scores: Scores::new(8.0, 7.0, 9.0, 6.0),
        };

        let body: Value = serde_json::from_str(&m.to_body().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"action": "create", "registerNumber": "0042", "name": "Asha",
                   "d": 8.0, "s": 7.0, "c": 9.0, "i": 6.0})
        );
    }

    #[test]
    fn test_update_score_omits_name_and_assignment() {
        let m = Mutation::UpdateScore {
            register_number: "0042".to_string(),
            scores: Scores::default(),
        };

        let body = serde_json::to_value(&m).unwrap();
        let obj = body.as_object().unwrap();

        assert_eq!(obj["action"], "updateScore");
        assert!(!obj.contains_key("name"));
        assert!(!obj.contains_key("assignment"));
        assert_eq!(obj.len(), 6);
    }

    #[test]
    fn test_delete_body() {
        let body = serde_json::to_value(Mutation::delete("9")).unwrap();
        assert_eq!(body, json!({"action": "delete", "registerNumber": "9"}));
    }

    #[test]
    fn test_parse_update_assignment() {
        let m: Mutation = serde_json::from_value(json!({
            "action": "updateAssignment",
            "registerNumber": "12",
            "assignment": "Poster"
        }))
        .unwrap();

        assert_eq!(m.kind(), MutationKind::UpdateAssignment);
        assert_eq!(m.register_number(), "12");
    }

    #[test]
    fn test_parse_unknown_action_fails() {
        let result: Result<Mutation, _> =
            serde_json::from_value(json!({"action": "truncate", "registerNumber": "1"}));
        assert!(result.is_err());
    }
}
