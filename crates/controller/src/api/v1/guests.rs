// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Pre-registered guests of an event
//!
//! A guest turns into an RSVP once they submit the public form, see the intake crate.
use super::owner::Owner;
use super::response::{ApiError, NoContent};
use super::util::trimmed;
use super::ApiResponse;
use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post};
use chrono::{DateTime, Utc};
use database::Db;
use db_storage::events::Event;
use db_storage::guests::{Guest, NewGuest};
use serde::{Deserialize, Serialize};
use types::core::{EventId, GuestId};
use validator::Validate;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestResource {
    pub id: GuestId,
    pub full_name: String,
    pub phone: Option<String>,
    pub side: Option<String>,
    pub group_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Guest> for GuestResource {
    fn from(guest: Guest) -> Self {
        Self {
            id: guest.id,
            full_name: guest.full_name,
            phone: guest.phone,
            side: guest.side,
            group_name: guest.group_name,
            created_at: guest.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostGuestBody {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub side: Option<String>,
    #[validate(length(max = 100))]
    pub group_name: Option<String>,
}

/// API Endpoint *GET /events/{event_id}/guests*
#[get("/events/{event_id}/guests")]
pub async fn get_guests(
    db: Data<Db>,
    owner: Owner,
    event_id: Path<EventId>,
) -> Result<ApiResponse<Vec<GuestResource>>, ApiError> {
    let event_id = event_id.into_inner();

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        Event::get_for_owner(&mut conn, event_id, owner.as_str())?;

        let guests: Vec<_> = Guest::get_all_for_event(&mut conn, event_id)?
            .into_iter()
            .map(GuestResource::from)
            .collect();

        Ok(ApiResponse::new(guests))
    })
    .await?
}

/// API Endpoint *POST /events/{event_id}/guests*
///
/// The phone is stored as entered, matching against submissions normalizes both sides.
#[post("/events/{event_id}/guests")]
pub async fn new_guest(
    db: Data<Db>,
    owner: Owner,
    event_id: Path<EventId>,
    body: Json<PostGuestBody>,
) -> Result<ApiResponse<GuestResource>, ApiError> {
    let event_id = event_id.into_inner();
    let body = PostGuestBody {
        full_name: body.full_name.trim().to_owned(),
        ..body.into_inner()
    };

    body.validate()?;

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        Event::get_for_owner(&mut conn, event_id, owner.as_str())?;

        let guest = NewGuest {
            event_id,
            full_name: body.full_name,
            phone: trimmed(body.phone),
            side: trimmed(body.side),
            group_name: trimmed(body.group_name),
        }
        .insert(&mut conn)?;

        Ok(ApiResponse::created(GuestResource::from(guest)))
    })
    .await?
}

/// API Endpoint *DELETE /events/{event_id}/guests/{guest_id}*
///
/// Also releases the seat of the guest
#[delete("/events/{event_id}/guests/{guest_id}")]
pub async fn delete_guest(
    db: Data<Db>,
    owner: Owner,
    path: Path<(EventId, GuestId)>,
) -> Result<NoContent, ApiError> {
    let (event_id, guest_id) = path.into_inner();

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        Event::get_for_owner(&mut conn, event_id, owner.as_str())?;
        Guest::delete(&mut conn, event_id, guest_id)?;

        Ok(NoContent)
    })
    .await?
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn blank_name_is_invalid() {
        let body = PostGuestBody {
            full_name: String::new(),
            phone: None,
            side: None,
            group_name: None,
        };

        assert!(body.validate().is_err());
    }
}
