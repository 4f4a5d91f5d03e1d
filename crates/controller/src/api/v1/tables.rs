// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::owner::Owner;
use super::response::{ApiError, NoContent};
use super::ApiResponse;
use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post};
use database::Db;
use db_storage::events::Event;
use db_storage::seatings::{occupied_seats, Seating, TableOccupant};
use db_storage::tables::{EventTable, NewEventTable};
use serde::{Deserialize, Serialize};
use types::core::{EventId, TableId};
use validator::Validate;

/// A table with the number of seats currently taken
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResource {
    pub id: TableId,
    pub name: String,
    pub capacity: i32,
    pub occupied: i32,
}

impl TableResource {
    fn new(table: EventTable, occupants: &[TableOccupant]) -> Self {
        let occupied = occupied_seats(
            occupants
                .iter()
                .filter(|occupant| occupant.seating.table_id == table.id),
        );

        Self {
            id: table.id,
            name: table.name,
            capacity: table.capacity,
            occupied,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostTableBody {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1, max = 1000))]
    pub capacity: i32,
}

/// API Endpoint *GET /events/{event_id}/tables*
#[get("/events/{event_id}/tables")]
pub async fn get_tables(
    db: Data<Db>,
    owner: Owner,
    event_id: Path<EventId>,
) -> Result<ApiResponse<Vec<TableResource>>, ApiError> {
    let event_id = event_id.into_inner();

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        Event::get_for_owner(&mut conn, event_id, owner.as_str())?;

        let tables = EventTable::get_all_for_event(&mut conn, event_id)?;
        let occupants = Seating::get_occupants_of_event(&mut conn, event_id)?;

        let tables: Vec<_> = tables
            .into_iter()
            .map(|table| TableResource::new(table, &occupants))
            .collect();

        Ok(ApiResponse::new(tables))
    })
    .await?
}

/// API Endpoint *POST /events/{event_id}/tables*
#[post("/events/{event_id}/tables")]
pub async fn new_table(
    db: Data<Db>,
    owner: Owner,
    event_id: Path<EventId>,
    body: Json<PostTableBody>,
) -> Result<ApiResponse<TableResource>, ApiError> {
    let event_id = event_id.into_inner();
    let body = PostTableBody {
        name: body.name.trim().to_owned(),
        ..body.into_inner()
    };

    body.validate()?;

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        Event::get_for_owner(&mut conn, event_id, owner.as_str())?;

        let table = NewEventTable {
            event_id,
            name: body.name,
            capacity: body.capacity,
        }
        .insert(&mut conn)?;

        Ok(ApiResponse::created(TableResource::new(table, &[])))
    })
    .await?
}

/// API Endpoint *DELETE /events/{event_id}/tables/{table_id}*
///
/// Everyone seated at the table loses their seat
#[delete("/events/{event_id}/tables/{table_id}")]
pub async fn delete_table(
    db: Data<Db>,
    owner: Owner,
    path: Path<(EventId, TableId)>,
) -> Result<NoContent, ApiError> {
    let (event_id, table_id) = path.into_inner();

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        Event::get_for_owner(&mut conn, event_id, owner.as_str())?;
        EventTable::delete(&mut conn, event_id, table_id)?;

        Ok(NoContent)
    })
    .await?
}
