// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::IntakeError;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

/// Largest party a single RSVP may declare, keep in sync with the range validation below
pub const MAX_PARTY_SIZE: i32 = 50;

/// Body of a public RSVP form submission
///
/// Required fields are optional here so that event policy checks can reject a submission
/// before its content is judged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[validate(required, length(min = 1, max = 200))]
    pub full_name: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(required, range(min = 0, max = 50))]
    pub attending_count: Option<i32>,
    #[validate(length(max = 200))]
    pub meal_choice: Option<String>,
    #[validate(length(max = 1000))]
    pub allergies: Option<String>,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
    #[serde(default)]
    pub consent_updates: bool,
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub full_name: String,
    pub phone: Option<String>,
    pub attending_count: i32,
    pub meal_choice: Option<String>,
    pub allergies: Option<String>,
    pub comment: Option<String>,
    pub consent_updates: bool,
}

impl Submission {
    /// Trims all text fields, blank text counts as absent
    pub fn sanitized(self) -> Self {
        Self {
            full_name: trimmed(self.full_name),
            phone: trimmed(self.phone),
            attending_count: self.attending_count,
            meal_choice: trimmed(self.meal_choice),
            allergies: trimmed(self.allergies),
            comment: trimmed(self.comment),
            consent_updates: self.consent_updates,
        }
    }

    pub fn validated(self) -> Result<ValidSubmission, ValidationErrors> {
        self.validate()?;

        match (self.full_name, self.attending_count) {
            (Some(full_name), Some(attending_count)) => Ok(ValidSubmission {
                full_name,
                phone: self.phone,
                attending_count,
                meal_choice: self.meal_choice,
                allergies: self.allergies,
                comment: self.comment,
                consent_updates: self.consent_updates,
            }),
            (full_name, _) => {
                let mut errors = ValidationErrors::new();
                let field = if full_name.is_none() {
                    "full_name"
                } else {
                    "attending_count"
                };
                errors.add(field, ValidationError::new("required"));
                Err(errors)
            }
        }
    }
}

/// Request body of a submission, decoded only once the event accepts submissions
pub trait SubmissionBody {
    fn into_submission(self) -> Result<Submission, IntakeError>;
}

impl SubmissionBody for Submission {
    fn into_submission(self) -> Result<Submission, IntakeError> {
        Ok(self)
    }
}

/// Raw JSON as received by the public form endpoint
impl SubmissionBody for &[u8] {
    fn into_submission(self) -> Result<Submission, IntakeError> {
        serde_json::from_slice(self).map_err(IntakeError::InvalidJson)
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn submission(json: serde_json::Value) -> Submission {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn camel_case_body() {
        let valid = submission(serde_json::json!({
            "fullName": "  Rina Levi ",
            "phone": "052-555-1234",
            "attendingCount": 3,
            "mealChoice": "vegan",
            "consentUpdates": true,
        }))
        .sanitized()
        .validated()
        .unwrap();

        assert_eq!(
            valid,
            ValidSubmission {
                full_name: "Rina Levi".into(),
                phone: Some("052-555-1234".into()),
                attending_count: 3,
                meal_choice: Some("vegan".into()),
                allergies: None,
                comment: None,
                consent_updates: true,
            }
        );
    }

    #[test]
    fn blank_name_is_missing() {
        let errors = submission(serde_json::json!({
            "fullName": "   ",
            "attendingCount": 1,
        }))
        .sanitized()
        .validated()
        .unwrap_err();

        assert!(errors.field_errors().contains_key("full_name"));
    }

    #[test]
    fn party_size_bounds() {
        for (count, ok) in [(-1, false), (0, true), (MAX_PARTY_SIZE, true), (51, false)] {
            let result = Submission {
                full_name: Some("Rina".into()),
                attending_count: Some(count),
                ..Default::default()
            }
            .validated();

            assert_eq!(result.is_ok(), ok, "attending count {count}");
        }

        let missing = Submission {
            full_name: Some("Rina".into()),
            ..Default::default()
        }
        .validated()
        .unwrap_err();
        assert!(missing.field_errors().contains_key("attending_count"));
    }

    #[test]
    fn raw_body_is_decoded() {
        let body: &[u8] = br#"{"fullName":"Rina","attendingCount":2,"consentUpdates":true}"#;
        let submission = body.into_submission().unwrap();

        assert_eq!(submission.full_name.as_deref(), Some("Rina"));
        assert_eq!(submission.attending_count, Some(2));
        assert!(submission.consent_updates);

        let malformed: [&[u8]; 3] = [
            br#"{"fullName":"Rina","attendingCount":"two"}"#,
            b"",
            b"rsvp",
        ];
        for body in malformed {
            let err = body.into_submission().unwrap_err();
            assert_eq!(err.code(), "INVALID_JSON");
        }
    }

    #[test]
    fn overlong_name() {
        let result = Submission {
            full_name: Some("x".repeat(201)),
            attending_count: Some(1),
            ..Default::default()
        }
        .validated();

        assert!(result.is_err());
    }
}
