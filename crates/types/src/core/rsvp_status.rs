// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Whether an RSVP confirms attendance
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RsvpStatus {
    /// At least one person attends
    Attending,
    /// Nobody attends, the attending count is zero
    Declined,
}

impl RsvpStatus {
    /// Derive the status from the declared party size
    pub fn from_attending_count(attending_count: i32) -> Self {
        if attending_count > 0 {
            Self::Attending
        } else {
            Self::Declined
        }
    }
}

/// What a public RSVP submission did to the stored records
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubmissionOutcome {
    /// A new RSVP record was written
    Created,
    /// An existing RSVP record was overwritten
    Updated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_attendees_is_declined() {
        assert_eq!(RsvpStatus::from_attending_count(0), RsvpStatus::Declined);
        assert_eq!(RsvpStatus::from_attending_count(1), RsvpStatus::Attending);
        assert_eq!(RsvpStatus::from_attending_count(12), RsvpStatus::Attending);
    }

    #[test]
    fn wire_names() {
        assert_eq!(RsvpStatus::Declined.as_ref(), "declined");
        assert_eq!(SubmissionOutcome::Updated.to_string(), "updated");
        assert_eq!(
            serde_json::to_value(RsvpStatus::Attending).unwrap(),
            serde_json::json!("attending")
        );
    }
}
