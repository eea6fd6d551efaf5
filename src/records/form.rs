//! Raw form input and its coercion into mutations

use serde::Serialize;
use std::str::FromStr;

use super::error::FormError;
use super::mutation::Mutation;
use super::record::Scores;

/// Editable fields of the record form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    RegisterNumber,
    Name,
    D,
    S,
    C,
    I,
    Assignment,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::RegisterNumber,
        FormField::Name,
        FormField::D,
        FormField::S,
        FormField::C,
        FormField::I,
        FormField::Assignment,
    ];

    /// Wire name, identical to the record's JSON field
    pub fn name(&self) -> &'static str {
        match self {
            FormField::RegisterNumber => "registerNumber",
            FormField::Name => "name",
            FormField::D => "d",
            FormField::S => "s",
            FormField::C => "c",
            FormField::I => "i",
            FormField::Assignment => "assignment",
        }
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Form state: every field kept as the raw text the user typed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
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
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw input under the named field
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::RegisterNumber => self.register_number = value,
            FormField::Name => self.name = value,
            FormField::D => self.d = value,
            FormField::S => self.s = value,
            FormField::C => self.c = value,
            FormField::I => self.i = value,
            FormField::Assignment => self.assignment = value,
        }
    }

    /// Store raw input under a field given by its wire name
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field: FormField = name.parse()?;
        self.set(field, value);
        Ok(())
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::RegisterNumber => &self.register_number,
            FormField::Name => &self.name,
            FormField::D => &self.d,
            FormField::S => &self.s,
            FormField::C => &self.c,
            FormField::I => &self.i,
            FormField::Assignment => &self.assignment,
        }
    }

    /// Coerce the four score fields. Blank text counts as zero.
    pub fn scores(&self) -> Result<Scores, FormError> {
        Ok(Scores {
            d: coerce_score("d", &self.d)?,
            s: coerce_score("s", &self.s)?,
            c: coerce_score("c", &self.c)?,
            i: coerce_score("i", &self.i)?,
        })
    }

    pub fn create(&self) -> Result<Mutation, FormError> {
        Ok(Mutation::Create {
            register_number: self.register_number.clone(),
            name: self.name.clone(),
            scores: self.scores()?,
        })
    }

    pub fn update_score(&self) -> Result<Mutation, FormError> {
        Ok(Mutation::UpdateScore {
            register_number: self.register_number.clone(),
            scores: self.scores()?,
        })
    }

    pub fn update_assignment(&self) -> Mutation {
        Mutation::UpdateAssignment {
            register_number: self.register_number.clone(),
            assignment: self.assignment.clone(),
        }
    }
}

fn coerce_score(field: &'static str, raw: &str) -> Result<f64, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FormError::InvalidScore {
            field,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_field_by_name() {
        let mut form = RecordForm::new();
        form.set_field("registerNumber", "0042").unwrap();
        form.set_field("s", "7").unwrap();

        assert_eq!(form.get(FormField::RegisterNumber), "0042");
        assert_eq!(form.s, "7");
    }

    #[test]
    fn test_unknown_field() {
        let mut form = RecordForm::new();
        let err = form.set_field("grade", "A").unwrap_err();
        assert_eq!(err, FormError::UnknownField("grade".to_string()));
    }

    #[test]
    fn test_blank_scores_coerce_to_zero() {
        let mut form = RecordForm::new();
        form.set(FormField::RegisterNumber, "0042");
        form.set(FormField::C, "9");

        match form.update_score().unwrap() {
            Mutation::UpdateScore { scores, .. } => {
                assert_eq!(scores, Scores::new(0.0, 0.0, 9.0, 0.0));
            }
            other => panic!("unexpected mutation {:?}", other),
        }
    }

    #[test]
    fn test_invalid_score_rejected() {
        let mut form = RecordForm::new();
        form.set(FormField::I, "eight");

        let err = form.create().unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidScore {
                field: "i",
                value: "eight".to_string()
            }
        );
    }

    #[test]
    fn test_update_assignment_ignores_scores() {
        let mut form = RecordForm::new();
        form.set(FormField::RegisterNumber, "5");
        form.set(FormField::D, "not checked here");
        form.set(FormField::Assignment, "Poster");

        assert_eq!(
            form.update_assignment(),
            Mutation::UpdateAssignment {
                register_number: "5".to_string(),
                assignment: "Poster".to_string(),
            }
        );
    }
}
