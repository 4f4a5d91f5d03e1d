// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::schema::event_tables;
use chrono::{DateTime, Utc};
use database::{DatabaseError, DbConnection, Result};
use diesel::prelude::*;
use types::core::{EventId, TableId};

/// A table guests can be seated at
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[diesel(table_name = event_tables)]
pub struct EventTable {
    pub id: TableId,
    pub event_id: EventId,
    pub name: String,
    /// Number of seats, at least one
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

impl EventTable {
    #[tracing::instrument(err, skip_all)]
    pub fn get(conn: &mut DbConnection, event_id: EventId, table_id: TableId) -> Result<Self> {
        let table = event_tables::table
            .filter(
                event_tables::id
                    .eq(table_id)
                    .and(event_tables::event_id.eq(event_id)),
            )
            .first(conn)?;

        Ok(table)
    }

    /// Selects the table with `FOR UPDATE`
    ///
    /// Must run inside a transaction, the lock serializes capacity checks of this table until
    /// the transaction ends.
    #[tracing::instrument(err, skip_all)]
    pub fn get_for_update(conn: &mut DbConnection, table_id: TableId) -> Result<Self> {
        let table = event_tables::table
            .filter(event_tables::id.eq(table_id))
            .for_update()
            .first(conn)?;

        Ok(table)
    }

    #[tracing::instrument(err, skip_all)]
    pub fn get_all_for_event(conn: &mut DbConnection, event_id: EventId) -> Result<Vec<Self>> {
        let tables = event_tables::table
            .filter(event_tables::event_id.eq(event_id))
            .order((event_tables::name.asc(), event_tables::id.asc()))
            .load(conn)?;

        Ok(tables)
    }

    /// Deletes the table along with all seatings at it
    #[tracing::instrument(err, skip_all)]
    pub fn delete(conn: &mut DbConnection, event_id: EventId, table_id: TableId) -> Result<()> {
        let deleted = diesel::delete(event_tables::table)
            .filter(
                event_tables::id
                    .eq(table_id)
                    .and(event_tables::event_id.eq(event_id)),
            )
            .execute(conn)?;

        if deleted == 0 {
            return Err(DatabaseError::NotFound);
        }

        Ok(())
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = event_tables)]
pub struct NewEventTable {
    pub event_id: EventId,
    pub name: String,
    pub capacity: i32,
}

impl NewEventTable {
    #[tracing::instrument(err, skip_all)]
    pub fn insert(self, conn: &mut DbConnection) -> Result<EventTable> {
        let table = diesel::insert_into(event_tables::table)
            .values(self)
            .get_result(conn)?;

        Ok(table)
    }
}
