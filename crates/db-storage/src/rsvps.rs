// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::checkins::Checkin;
use crate::schema::{checkins, rsvps};
use chrono::{DateTime, Utc};
use database::{DbConnection, Result};
use diesel::prelude::*;
use types::core::{EventId, RsvpId, RsvpStatus};

/// The authoritative answer of a guest to the invitation
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[diesel(table_name = rsvps)]
pub struct Rsvp {
    pub id: RsvpId,
    pub event_id: EventId,
    pub full_name: String,
    /// Normalized phone, see [`types::core::NormalizedPhone`]
    pub phone: Option<String>,
    /// Number of attending people, zero means declined
    pub attending_count: i32,
    pub meal_choice: Option<String>,
    pub allergies: Option<String>,
    pub comment: Option<String>,
    pub consent_updates: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rsvp {
    pub fn status(&self) -> RsvpStatus {
        RsvpStatus::from_attending_count(self.attending_count)
    }

    #[tracing::instrument(err, skip_all)]
    pub fn get(conn: &mut DbConnection, event_id: EventId, rsvp_id: RsvpId) -> Result<Rsvp> {
        let rsvp = rsvps::table
            .filter(rsvps::id.eq(rsvp_id).and(rsvps::event_id.eq(event_id)))
            .first(conn)?;

        Ok(rsvp)
    }

    /// Returns all RSVPs of the event along with their check-in, if any
    #[tracing::instrument(err, skip_all)]
    pub fn get_all_with_checkin(
        conn: &mut DbConnection,
        event_id: EventId,
    ) -> Result<Vec<(Rsvp, Option<Checkin>)>> {
        let query = rsvps::table
            .left_join(checkins::table)
            .filter(rsvps::event_id.eq(event_id))
            .order((rsvps::created_at.asc(), rsvps::id.asc()))
            .select((rsvps::all_columns, checkins::all_columns.nullable()));

        let rsvps = query.load(conn)?;

        Ok(rsvps)
    }

    /// Returns the oldest RSVP of the event with this normalized phone
    #[tracing::instrument(err, skip_all)]
    pub fn find_by_phone(
        conn: &mut DbConnection,
        event_id: EventId,
        phone: &str,
    ) -> Result<Option<Rsvp>> {
        let rsvp = rsvps::table
            .filter(rsvps::event_id.eq(event_id).and(rsvps::phone.eq(phone)))
            .order((rsvps::created_at.asc(), rsvps::id.asc()))
            .first(conn)
            .optional()?;

        Ok(rsvp)
    }

    /// Returns the oldest RSVP of the event with exactly this name
    #[tracing::instrument(err, skip_all)]
    pub fn find_by_name(
        conn: &mut DbConnection,
        event_id: EventId,
        full_name: &str,
    ) -> Result<Option<Rsvp>> {
        let rsvp = rsvps::table
            .filter(
                rsvps::event_id
                    .eq(event_id)
                    .and(rsvps::full_name.eq(full_name)),
            )
            .order((rsvps::created_at.asc(), rsvps::id.asc()))
            .first(conn)
            .optional()?;

        Ok(rsvp)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rsvps)]
pub struct NewRsvp {
    pub event_id: EventId,
    pub full_name: String,
    pub phone: Option<String>,
    pub attending_count: i32,
    pub meal_choice: Option<String>,
    pub allergies: Option<String>,
    pub comment: Option<String>,
    pub consent_updates: bool,
}

impl NewRsvp {
    #[tracing::instrument(err, skip_all)]
    pub fn insert(self, conn: &mut DbConnection) -> Result<Rsvp> {
        let rsvp = diesel::insert_into(rsvps::table)
            .values(self)
            .get_result(conn)?;

        Ok(rsvp)
    }
}

/// Overwrites every answer of an RSVP, absent optional answers are cleared
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = rsvps, treat_none_as_null = true)]
pub struct UpdateRsvp {
    pub full_name: String,
    pub phone: Option<String>,
    pub attending_count: i32,
    pub meal_choice: Option<String>,
    pub allergies: Option<String>,
    pub comment: Option<String>,
    pub consent_updates: bool,
    pub updated_at: DateTime<Utc>,
}

impl UpdateRsvp {
    #[tracing::instrument(err, skip_all)]
    pub fn apply(self, conn: &mut DbConnection, rsvp_id: RsvpId) -> Result<Rsvp> {
        let query = diesel::update(rsvps::table)
            .filter(rsvps::id.eq(rsvp_id))
            .set(self)
            .returning(rsvps::all_columns);

        let rsvp = query.get_result(conn)?;

        Ok(rsvp)
    }
}
