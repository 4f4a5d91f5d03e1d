// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use database::DatabaseError;
use validator::ValidationErrors;

/// Reasons a submission gets rejected
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Event not found")]
    EventNotFound,
    #[error("RSVP is closed for this event")]
    RsvpClosed,
    #[error("RSVP changes are locked for this event")]
    RsvpLocked,
    #[error("A phone number is required")]
    PhoneRequired,
    #[error("An RSVP for this guest already exists")]
    DuplicateRsvp,
    #[error("Invalid JSON in request body: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Invalid RSVP submission")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl IntakeError {
    /// Machine readable code of the error
    pub fn code(&self) -> &'static str {
        match self {
            IntakeError::EventNotFound => "EVENT_NOT_FOUND",
            IntakeError::RsvpClosed => "RSVP_CLOSED",
            IntakeError::RsvpLocked => "RSVP_LOCKED",
            IntakeError::PhoneRequired => "PHONE_REQUIRED",
            IntakeError::DuplicateRsvp => "DUPLICATE_RSVP",
            IntakeError::InvalidJson(_) => "INVALID_JSON",
            IntakeError::Validation(_) => "VALIDATION_FAILED",
            IntakeError::Database(_) => "SERVER_ERROR",
        }
    }
}

impl From<diesel::result::Error> for IntakeError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err.into())
    }
}
