// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::schema::checkins;
use chrono::{DateTime, Utc};
use database::{DatabaseError, DbConnection, Result};
use diesel::prelude::*;
use types::core::{CheckinId, EventId, RsvpId};

/// Arrival of an RSVP at the venue, at most one per RSVP
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[diesel(table_name = checkins)]
pub struct Checkin {
    pub id: CheckinId,
    pub event_id: EventId,
    pub rsvp_id: RsvpId,
    pub checked_in_at: DateTime<Utc>,
}

impl Checkin {
    #[tracing::instrument(err, skip_all)]
    pub fn delete_for_rsvp(conn: &mut DbConnection, event_id: EventId, rsvp_id: RsvpId) -> Result<()> {
        let deleted = diesel::delete(checkins::table)
            .filter(
                checkins::rsvp_id
                    .eq(rsvp_id)
                    .and(checkins::event_id.eq(event_id)),
            )
            .execute(conn)?;

        if deleted == 0 {
            return Err(DatabaseError::NotFound);
        }

        Ok(())
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = checkins)]
pub struct NewCheckin {
    pub event_id: EventId,
    pub rsvp_id: RsvpId,
}

impl NewCheckin {
    /// Inserts the check-in, a second check-in of the same RSVP violates the unique constraint
    #[tracing::instrument(err, skip_all)]
    pub fn insert(self, conn: &mut DbConnection) -> Result<Checkin> {
        let checkin = diesel::insert_into(checkins::table)
            .values(self)
            .get_result(conn)?;

        Ok(checkin)
    }
}
