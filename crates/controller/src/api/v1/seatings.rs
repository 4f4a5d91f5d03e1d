// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Seat assignments
//!
//! A seating places either a pre-registered guest or an RSVP at a table. Assignments
//! follow the same occupancy rule as the RSVP intake: an RSVP takes as many seats as it
//! declared attendees (at least one), a guest takes one.
use super::owner::Owner;
use super::response::{ApiError, NoContent};
use super::ApiResponse;
use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post};
use chrono::{DateTime, Utc};
use database::{Db, DbConnection};
use db_storage::events::Event;
use db_storage::guests::Guest;
use db_storage::rsvps::Rsvp;
use db_storage::seatings::{occupied_seats, NewSeating, Seating};
use db_storage::tables::EventTable;
use diesel::Connection;
use serde::{Deserialize, Serialize};
use types::core::{EventId, GuestId, RsvpId, SeatingId, TableId};
use validator::Validate;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingResource {
    pub id: SeatingId,
    pub table_id: TableId,
    pub guest_id: Option<GuestId>,
    pub rsvp_id: Option<RsvpId>,
    pub seat_number: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Seating> for SeatingResource {
    fn from(seating: Seating) -> Self {
        Self {
            id: seating.id,
            table_id: seating.table_id,
            guest_id: seating.guest_id,
            rsvp_id: seating.rsvp_id,
            seat_number: seating.seat_number,
            created_at: seating.created_at,
        }
    }
}

/// Body of the `POST /events/{event_id}/seatings` endpoint
///
/// Exactly one of `guestId` and `rsvpId` must be set.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostSeatingBody {
    pub table_id: TableId,
    pub guest_id: Option<GuestId>,
    pub rsvp_id: Option<RsvpId>,
    #[validate(range(min = 1, max = 1000))]
    pub seat_number: Option<i32>,
}

/// The party to be seated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occupant {
    Guest(GuestId),
    Rsvp(RsvpId),
}

impl PostSeatingBody {
    fn occupant(&self) -> Result<Occupant, ApiError> {
        match (self.guest_id, self.rsvp_id) {
            (Some(guest_id), None) => Ok(Occupant::Guest(guest_id)),
            (None, Some(rsvp_id)) => Ok(Occupant::Rsvp(rsvp_id)),
            _ => Err(ApiError::bad_request()
                .with_code("INVALID_OCCUPANT")
                .with_message("Exactly one of guestId and rsvpId must be set")),
        }
    }
}

impl Occupant {
    /// Checks the occupant belongs to the event and returns the seats it takes
    fn party_size(self, conn: &mut DbConnection, event_id: EventId) -> Result<i32, ApiError> {
        match self {
            Occupant::Guest(guest_id) => {
                Guest::get(conn, event_id, guest_id)?;
                Ok(1)
            }
            Occupant::Rsvp(rsvp_id) => {
                let rsvp = Rsvp::get(conn, event_id, rsvp_id)?;
                Ok(rsvp.attending_count.max(1))
            }
        }
    }

    fn current_seating(self, conn: &mut DbConnection) -> Result<Option<Seating>, ApiError> {
        let seating = match self {
            Occupant::Guest(guest_id) => Seating::get_for_guest(conn, guest_id)?,
            Occupant::Rsvp(rsvp_id) => Seating::get_for_rsvp(conn, rsvp_id)?,
        };

        Ok(seating)
    }
}

/// API Endpoint *GET /events/{event_id}/seatings*
#[get("/events/{event_id}/seatings")]
pub async fn get_seatings(
    db: Data<Db>,
    owner: Owner,
    event_id: Path<EventId>,
) -> Result<ApiResponse<Vec<SeatingResource>>, ApiError> {
    let event_id = event_id.into_inner();

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        Event::get_for_owner(&mut conn, event_id, owner.as_str())?;

        let seatings: Vec<_> = Seating::get_all_for_event(&mut conn, event_id)?
            .into_iter()
            .map(SeatingResource::from)
            .collect();

        Ok(ApiResponse::new(seatings))
    })
    .await?
}

/// API Endpoint *POST /events/{event_id}/seatings*
///
/// Seats a guest or RSVP at a table. The table row is locked while its occupancy is
/// computed, so concurrent assignments and RSVP conversions cannot overfill it.
#[post("/events/{event_id}/seatings")]
pub async fn new_seating(
    db: Data<Db>,
    owner: Owner,
    event_id: Path<EventId>,
    body: Json<PostSeatingBody>,
) -> Result<ApiResponse<SeatingResource>, ApiError> {
    let event_id = event_id.into_inner();
    let body = body.into_inner();

    body.validate()?;
    let occupant = body.occupant()?;

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        conn.transaction::<_, ApiError, _>(|conn| {
            Event::get_for_owner(conn, event_id, owner.as_str())?;

            // Make sure the table exists within this event before locking it
            EventTable::get(conn, event_id, body.table_id)?;
            let table = EventTable::get_for_update(conn, body.table_id)?;

            let party_size = occupant.party_size(conn, event_id)?;

            if occupant.current_seating(conn)?.is_some() {
                return Err(ApiError::conflict()
                    .with_code("ALREADY_SEATED")
                    .with_message("The guest is already seated"));
            }

            let occupants = Seating::get_occupants_of_table(conn, table.id)?;
            let occupied = occupied_seats(&occupants);

            if occupied + party_size > table.capacity {
                log::debug!(
                    "Rejecting party of {} at table {}, {} of {} seats taken",
                    party_size,
                    table.id,
                    occupied,
                    table.capacity
                );

                return Err(ApiError::conflict().with_code("TABLE_FULL").with_message(
                    format!(
                        "Table \"{}\" has {} free seat(s), {} needed",
                        table.name,
                        (table.capacity - occupied).max(0),
                        party_size
                    ),
                ));
            }

            let (guest_id, rsvp_id) = match occupant {
                Occupant::Guest(guest_id) => (Some(guest_id), None),
                Occupant::Rsvp(rsvp_id) => (None, Some(rsvp_id)),
            };

            let seating = NewSeating {
                event_id,
                table_id: table.id,
                guest_id,
                rsvp_id,
                seat_number: body.seat_number,
            }
            .insert(conn)?;

            Ok(ApiResponse::created(SeatingResource::from(seating)))
        })
    })
    .await?
}

/// API Endpoint *DELETE /events/{event_id}/seatings/{seating_id}*
#[delete("/events/{event_id}/seatings/{seating_id}")]
pub async fn delete_seating(
    db: Data<Db>,
    owner: Owner,
    path: Path<(EventId, SeatingId)>,
) -> Result<NoContent, ApiError> {
    let (event_id, seating_id) = path.into_inner();

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        Event::get_for_owner(&mut conn, event_id, owner.as_str())?;
        Seating::delete(&mut conn, event_id, seating_id)?;

        Ok(NoContent)
    })
    .await?
}
