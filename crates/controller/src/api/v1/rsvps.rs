// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::owner::Owner;
use super::response::ApiError;
use super::ApiResponse;
use actix_web::get;
use actix_web::web::{Data, Path};
use chrono::{DateTime, Utc};
use database::Db;
use db_storage::checkins::Checkin;
use db_storage::events::Event;
use db_storage::rsvps::Rsvp;
use serde::Serialize;
use types::core::{EventId, RsvpId, RsvpStatus};

/// A received RSVP with its check-in state
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpResource {
    pub id: RsvpId,
    pub full_name: String,
    pub phone: Option<String>,
    pub attending_count: i32,
    pub status: RsvpStatus,
    pub meal_choice: Option<String>,
    pub allergies: Option<String>,
    pub comment: Option<String>,
    pub consent_updates: bool,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RsvpResource {
    fn from_db(rsvp: Rsvp, checkin: Option<Checkin>) -> Self {
        Self {
            status: rsvp.status(),
            id: rsvp.id,
            full_name: rsvp.full_name,
            phone: rsvp.phone,
            attending_count: rsvp.attending_count,
            meal_choice: rsvp.meal_choice,
            allergies: rsvp.allergies,
            comment: rsvp.comment,
            consent_updates: rsvp.consent_updates,
            checked_in_at: checkin.map(|checkin| checkin.checked_in_at),
            created_at: rsvp.created_at,
            updated_at: rsvp.updated_at,
        }
    }
}

/// API Endpoint *GET /events/{event_id}/rsvps*
///
/// Returns all RSVPs of the event in the order they were received
#[get("/events/{event_id}/rsvps")]
pub async fn get_rsvps(
    db: Data<Db>,
    owner: Owner,
    event_id: Path<EventId>,
) -> Result<ApiResponse<Vec<RsvpResource>>, ApiError> {
    let event_id = event_id.into_inner();

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        Event::get_for_owner(&mut conn, event_id, owner.as_str())?;

        let rsvps: Vec<_> = Rsvp::get_all_with_checkin(&mut conn, event_id)?
            .into_iter()
            .map(|(rsvp, checkin)| RsvpResource::from_db(rsvp, checkin))
            .collect();

        Ok(ApiResponse::new(rsvps))
    })
    .await?
}
