// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::schema::guests;
use chrono::{DateTime, Utc};
use database::{DatabaseError, DbConnection, Result};
use diesel::prelude::*;
use types::core::{EventId, GuestId};

/// A pre-registered invitee of an event
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[diesel(table_name = guests)]
pub struct Guest {
    pub id: GuestId,
    pub event_id: EventId,
    pub full_name: String,
    /// Phone as entered by the owner, not normalized
    pub phone: Option<String>,
    pub side: Option<String>,
    pub group_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Guest {
    #[tracing::instrument(err, skip_all)]
    pub fn get(conn: &mut DbConnection, event_id: EventId, guest_id: GuestId) -> Result<Guest> {
        let guest = guests::table
            .filter(guests::id.eq(guest_id).and(guests::event_id.eq(event_id)))
            .first(conn)?;

        Ok(guest)
    }

    #[tracing::instrument(err, skip_all)]
    pub fn get_all_for_event(conn: &mut DbConnection, event_id: EventId) -> Result<Vec<Guest>> {
        let guests = guests::table
            .filter(guests::event_id.eq(event_id))
            .order((guests::created_at.asc(), guests::id.asc()))
            .load(conn)?;

        Ok(guests)
    }

    /// Returns the oldest guest of the event with exactly this name
    #[tracing::instrument(err, skip_all)]
    pub fn find_by_name(
        conn: &mut DbConnection,
        event_id: EventId,
        full_name: &str,
    ) -> Result<Option<Guest>> {
        let guest = guests::table
            .filter(
                guests::event_id
                    .eq(event_id)
                    .and(guests::full_name.eq(full_name)),
            )
            .order((guests::created_at.asc(), guests::id.asc()))
            .first(conn)
            .optional()?;

        Ok(guest)
    }

    /// Returns the oldest guest of the event with exactly this stored phone value
    #[tracing::instrument(err, skip_all)]
    pub fn find_by_phone(
        conn: &mut DbConnection,
        event_id: EventId,
        phone: &str,
    ) -> Result<Option<Guest>> {
        let guest = guests::table
            .filter(guests::event_id.eq(event_id).and(guests::phone.eq(phone)))
            .order((guests::created_at.asc(), guests::id.asc()))
            .first(conn)
            .optional()?;

        Ok(guest)
    }

    /// Deletes the guest, any seating of the guest goes with it
    #[tracing::instrument(err, skip_all)]
    pub fn delete_by_id(conn: &mut DbConnection, guest_id: GuestId) -> Result<()> {
        let deleted = diesel::delete(guests::table)
            .filter(guests::id.eq(guest_id))
            .execute(conn)?;

        if deleted == 0 {
            return Err(DatabaseError::NotFound);
        }

        Ok(())
    }

    #[tracing::instrument(err, skip_all)]
    pub fn delete(conn: &mut DbConnection, event_id: EventId, guest_id: GuestId) -> Result<()> {
        let deleted = diesel::delete(guests::table)
            .filter(guests::id.eq(guest_id).and(guests::event_id.eq(event_id)))
            .execute(conn)?;

        if deleted == 0 {
            return Err(DatabaseError::NotFound);
        }

        Ok(())
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = guests)]
pub struct NewGuest {
    pub event_id: EventId,
    pub full_name: String,
    pub phone: Option<String>,
    pub side: Option<String>,
    pub group_name: Option<String>,
}

impl NewGuest {
    #[tracing::instrument(err, skip_all)]
    pub fn insert(self, conn: &mut DbConnection) -> Result<Guest> {
        let guest = diesel::insert_into(guests::table)
            .values(self)
            .get_result(conn)?;

        Ok(guest)
    }
}
