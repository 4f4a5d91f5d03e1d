// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Public RSVP form endpoints
//!
//! These endpoints are unauthenticated, an event is addressed by its slug only.
use crate::api::v1::response::ApiError;
use crate::api::v1::ApiResponse;
use crate::settings::SharedSettingsActix;
use actix_web::web::{Bytes, Data, Path};
use actix_web::{get, post};
use chrono::{DateTime, Utc};
use database::{Db, OptionalExt};
use db_storage::events::{Event, EventSettings};
use intake::{IntakeContext, IntakeError, IntakeOutcome};
use serde::Serialize;
use types::core::{RsvpId, RsvpStatus, SubmissionOutcome};

/// Everything the RSVP form needs to render itself
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicEvent {
    pub slug: String,
    pub event_name: String,
    pub couple_names: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub waze_link: Option<String>,
    pub notes: Option<String>,
    pub is_rsvp_open: bool,
    pub require_phone: bool,
    pub show_meal_choice: bool,
    pub show_allergies: bool,
    pub show_notes: bool,
    pub allow_updates: bool,
    pub consent_message: Option<String>,
}

impl PublicEvent {
    fn new(event: Event, settings: EventSettings) -> Self {
        Self {
            slug: event.slug,
            event_name: event.event_name,
            couple_names: event.couple_names,
            date_time: event.date_time,
            venue_name: event.venue_name,
            venue_address: event.venue_address,
            waze_link: event.waze_link,
            notes: event.notes,
            is_rsvp_open: event.is_rsvp_open,
            require_phone: settings.require_phone,
            show_meal_choice: settings.show_meal_choice,
            show_allergies: settings.show_allergies,
            show_notes: settings.show_notes,
            allow_updates: event.allow_updates,
            consent_message: settings.consent_message,
        }
    }
}

/// API Endpoint *GET /api/rsvp/{slug}/event*
#[get("/{slug}/event")]
pub async fn get_event(
    db: Data<Db>,
    slug: Path<String>,
) -> Result<ApiResponse<PublicEvent>, ApiError> {
    let slug = slug.into_inner();

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        let (event, settings) = Event::get_by_slug_with_settings(&mut conn, &slug)
            .optional()?
            .ok_or_else(|| ApiError::from(IntakeError::EventNotFound))?;

        Ok(ApiResponse::new(PublicEvent::new(event, settings)))
    })
    .await?
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedRsvp {
    pub id: RsvpId,
    pub attending_count: i32,
    pub status: RsvpStatus,
}

/// Response of an accepted submission
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: &'static str,
    pub outcome: SubmissionOutcome,
    pub rsvp: SubmittedRsvp,
}

impl From<IntakeOutcome> for SubmissionResponse {
    fn from(outcome: IntakeOutcome) -> Self {
        Self {
            success: true,
            message: outcome.message(),
            outcome: outcome.outcome,
            rsvp: SubmittedRsvp {
                id: outcome.rsvp.id,
                attending_count: outcome.rsvp.attending_count,
                status: outcome.status(),
            },
        }
    }
}

/// API Endpoint *POST /api/rsvp/{slug}*
///
/// Records the submission of the RSVP form. Both a new and an updated RSVP are answered
/// with `201 Created`, the `outcome` field tells them apart.
///
/// The body is taken as is and decoded by the intake after the event policy checks, a closed
/// form answers `RSVP_CLOSED` even to malformed JSON.
#[post("/{slug}")]
pub async fn submit(
    settings: SharedSettingsActix,
    db: Data<Db>,
    slug: Path<String>,
    body: Bytes,
) -> Result<ApiResponse<SubmissionResponse>, ApiError> {
    let slug = slug.into_inner();

    let ctx = IntakeContext {
        default_region: settings.load().rsvp.default_region,
        now: Utc::now(),
    };

    let outcome = crate::block(move || -> Result<_, IntakeError> {
        let mut conn = db.get_conn()?;

        intake::submit_rsvp(&mut conn, &slug, &body[..], &ctx)
    })
    .await??;

    Ok(ApiResponse::created(SubmissionResponse::from(outcome)))
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use db_storage::rsvps::Rsvp;
    use test_util::assert_eq_json;
    use types::core::EventId;

    #[test]
    fn submission_response_body() {
        let at = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();
        let outcome = IntakeOutcome {
            outcome: SubmissionOutcome::Created,
            rsvp: Rsvp {
                id: RsvpId::from(uuid::Uuid::nil()),
                event_id: EventId::generate(),
                full_name: "Dana Levi".into(),
                phone: None,
                attending_count: 3,
                meal_choice: None,
                allergies: None,
                comment: None,
                consent_updates: true,
                created_at: at,
                updated_at: at,
            },
            seat: None,
        };

        assert_eq_json!(
            SubmissionResponse::from(outcome),
            {
                "success": true,
                "message": "Thank you, your RSVP has been received",
                "outcome": "created",
                "rsvp": {
                    "id": "00000000-0000-0000-0000-000000000000",
                    "attendingCount": 3,
                    "status": "attending"
                }
            }
        );
    }
}
