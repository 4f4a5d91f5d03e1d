// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::schema::{rsvps, seatings};
use chrono::{DateTime, Utc};
use database::{DatabaseError, DbConnection, Result};
use diesel::prelude::*;
use types::core::{EventId, GuestId, RsvpId, SeatingId, TableId};

/// Assignment of exactly one guest or RSVP to a table
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[diesel(table_name = seatings)]
pub struct Seating {
    pub id: SeatingId,
    pub event_id: EventId,
    pub table_id: TableId,
    pub guest_id: Option<GuestId>,
    pub rsvp_id: Option<RsvpId>,
    pub seat_number: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// A seating together with the attending count of its RSVP, if it seats one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOccupant {
    pub seating: Seating,
    pub attending_count: Option<i32>,
}

impl TableOccupant {
    /// Number of seats this occupant takes
    ///
    /// An RSVP takes one seat per attending person but at least one, a bare guest takes one.
    pub fn party_size(&self) -> i32 {
        match (self.seating.rsvp_id, self.attending_count) {
            (Some(_), Some(count)) => count.max(1),
            _ => 1,
        }
    }
}

/// Sum of seats taken by `occupants`
pub fn occupied_seats<'a>(occupants: impl IntoIterator<Item = &'a TableOccupant>) -> i32 {
    occupants.into_iter().map(TableOccupant::party_size).sum()
}

impl Seating {
    #[tracing::instrument(err, skip_all)]
    pub fn get_all_for_event(conn: &mut DbConnection, event_id: EventId) -> Result<Vec<Seating>> {
        let seatings = seatings::table
            .filter(seatings::event_id.eq(event_id))
            .order((seatings::table_id.asc(), seatings::created_at.asc()))
            .load(conn)?;

        Ok(seatings)
    }

    #[tracing::instrument(err, skip_all)]
    pub fn get_for_guest(conn: &mut DbConnection, guest_id: GuestId) -> Result<Option<Seating>> {
        let seating = seatings::table
            .filter(seatings::guest_id.eq(guest_id))
            .first(conn)
            .optional()?;

        Ok(seating)
    }

    #[tracing::instrument(err, skip_all)]
    pub fn get_for_rsvp(conn: &mut DbConnection, rsvp_id: RsvpId) -> Result<Option<Seating>> {
        let seating = seatings::table
            .filter(seatings::rsvp_id.eq(rsvp_id))
            .first(conn)
            .optional()?;

        Ok(seating)
    }

    /// Returns every seating at the table with the party size information needed for capacity checks
    #[tracing::instrument(err, skip_all)]
    pub fn get_occupants_of_table(
        conn: &mut DbConnection,
        table_id: TableId,
    ) -> Result<Vec<TableOccupant>> {
        let query = seatings::table
            .left_join(rsvps::table)
            .filter(seatings::table_id.eq(table_id))
            .select((seatings::all_columns, rsvps::attending_count.nullable()));

        let occupants = query
            .load::<(Seating, Option<i32>)>(conn)?
            .into_iter()
            .map(|(seating, attending_count)| TableOccupant {
                seating,
                attending_count,
            })
            .collect();

        Ok(occupants)
    }

    /// Returns every seating of the event with its party size information
    #[tracing::instrument(err, skip_all)]
    pub fn get_occupants_of_event(
        conn: &mut DbConnection,
        event_id: EventId,
    ) -> Result<Vec<TableOccupant>> {
        let query = seatings::table
            .left_join(rsvps::table)
            .filter(seatings::event_id.eq(event_id))
            .select((seatings::all_columns, rsvps::attending_count.nullable()));

        let occupants = query
            .load::<(Seating, Option<i32>)>(conn)?
            .into_iter()
            .map(|(seating, attending_count)| TableOccupant {
                seating,
                attending_count,
            })
            .collect();

        Ok(occupants)
    }

    /// Moves the seat of a converted guest over to its new RSVP, keeping table and seat number
    #[tracing::instrument(err, skip_all)]
    pub fn reassign_to_rsvp(
        conn: &mut DbConnection,
        seating_id: SeatingId,
        rsvp_id: RsvpId,
    ) -> Result<Seating> {
        let query = diesel::update(seatings::table)
            .filter(seatings::id.eq(seating_id))
            .set((
                seatings::guest_id.eq(None::<GuestId>),
                seatings::rsvp_id.eq(Some(rsvp_id)),
            ))
            .returning(seatings::all_columns);

        let seating = query.get_result(conn)?;

        Ok(seating)
    }

    #[tracing::instrument(err, skip_all)]
    pub fn delete_by_id(conn: &mut DbConnection, seating_id: SeatingId) -> Result<()> {
        let deleted = diesel::delete(seatings::table)
            .filter(seatings::id.eq(seating_id))
            .execute(conn)?;

        if deleted == 0 {
            return Err(DatabaseError::NotFound);
        }

        Ok(())
    }

    #[tracing::instrument(err, skip_all)]
    pub fn delete(conn: &mut DbConnection, event_id: EventId, seating_id: SeatingId) -> Result<()> {
        let deleted = diesel::delete(seatings::table)
            .filter(
                seatings::id
                    .eq(seating_id)
                    .and(seatings::event_id.eq(event_id)),
            )
            .execute(conn)?;

        if deleted == 0 {
            return Err(DatabaseError::NotFound);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = seatings)]
pub struct NewSeating {
    pub event_id: EventId,
    pub table_id: TableId,
    pub guest_id: Option<GuestId>,
    pub rsvp_id: Option<RsvpId>,
    pub seat_number: Option<i32>,
}

impl NewSeating {
    #[tracing::instrument(err, skip_all)]
    pub fn insert(self, conn: &mut DbConnection) -> Result<Seating> {
        let seating = diesel::insert_into(seatings::table)
            .values(self)
            .get_result(conn)?;

        Ok(seating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupant(rsvp: bool, attending_count: Option<i32>) -> TableOccupant {
        TableOccupant {
            seating: Seating {
                id: SeatingId::generate(),
                event_id: EventId::generate(),
                table_id: TableId::generate(),
                guest_id: (!rsvp).then(GuestId::generate),
                rsvp_id: rsvp.then(RsvpId::generate),
                seat_number: None,
                created_at: Utc::now(),
            },
            attending_count,
        }
    }

    #[test]
    fn party_sizes() {
        assert_eq!(occupant(false, None).party_size(), 1);
        assert_eq!(occupant(true, Some(4)).party_size(), 4);
        // a declined RSVP still holds its seat
        assert_eq!(occupant(true, Some(0)).party_size(), 1);
    }

    #[test]
    fn occupied_sum() {
        let occupants = vec![
            occupant(true, Some(4)),
            occupant(false, None),
            occupant(true, Some(0)),
        ];

        assert_eq!(occupied_seats(&occupants), 6);
        assert_eq!(occupied_seats(&[]), 0);
    }
}
