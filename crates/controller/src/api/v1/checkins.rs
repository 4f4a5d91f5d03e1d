// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Check-in of arriving parties at the venue
use super::owner::Owner;
use super::response::{ApiError, NoContent};
use super::ApiResponse;
use actix_web::web::{Data, Path};
use actix_web::{delete, post};
use chrono::{DateTime, Utc};
use database::Db;
use db_storage::checkins::{Checkin, NewCheckin};
use db_storage::events::Event;
use db_storage::rsvps::Rsvp;
use serde::Serialize;
use types::core::{EventId, RsvpId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResource {
    pub rsvp_id: RsvpId,
    pub checked_in_at: DateTime<Utc>,
}

impl From<Checkin> for CheckinResource {
    fn from(checkin: Checkin) -> Self {
        Self {
            rsvp_id: checkin.rsvp_id,
            checked_in_at: checkin.checked_in_at,
        }
    }
}

/// API Endpoint *POST /events/{event_id}/rsvps/{rsvp_id}/checkin*
///
/// A party can only be checked in once, a second check-in is rejected with `ALREADY_CHECKED_IN`.
#[post("/events/{event_id}/rsvps/{rsvp_id}/checkin")]
pub async fn check_in(
    db: Data<Db>,
    owner: Owner,
    path: Path<(EventId, RsvpId)>,
) -> Result<ApiResponse<CheckinResource>, ApiError> {
    let (event_id, rsvp_id) = path.into_inner();

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        Event::get_for_owner(&mut conn, event_id, owner.as_str())?;
        Rsvp::get(&mut conn, event_id, rsvp_id)?;

        let checkin = NewCheckin { event_id, rsvp_id }
            .insert(&mut conn)
            .map_err(|e| {
                if e.is_unique_violation() {
                    ApiError::conflict()
                        .with_code("ALREADY_CHECKED_IN")
                        .with_message("The party has already been checked in")
                } else {
                    e.into()
                }
            })?;

        log::debug!("Checked in RSVP {}", rsvp_id);

        Ok(ApiResponse::created(CheckinResource::from(checkin)))
    })
    .await?
}

/// API Endpoint *DELETE /events/{event_id}/rsvps/{rsvp_id}/checkin*
#[delete("/events/{event_id}/rsvps/{rsvp_id}/checkin")]
pub async fn undo_check_in(
    db: Data<Db>,
    owner: Owner,
    path: Path<(EventId, RsvpId)>,
) -> Result<NoContent, ApiError> {
    let (event_id, rsvp_id) = path.into_inner();

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        Event::get_for_owner(&mut conn, event_id, owner.as_str())?;
        Checkin::delete_for_rsvp(&mut conn, event_id, rsvp_id)?;

        Ok(NoContent)
    })
    .await?
}
