// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::schema::{event_settings, events};
use chrono::{DateTime, Utc};
use database::{DatabaseError, DbConnection, Result};
use diesel::prelude::*;
use types::core::EventId;

/// Diesel event struct
///
/// Represents an event in the database
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[diesel(table_name = events)]
pub struct Event {
    pub id: EventId,
    pub slug: String,
    pub owner: String,
    pub event_name: String,
    pub couple_names: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub waze_link: Option<String>,
    pub notes: Option<String>,
    pub is_rsvp_open: bool,
    pub allow_updates: bool,
    pub lock_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Returns true if the lock date of the event has passed at `now`
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        self.lock_date.map(|lock| lock < now).unwrap_or(false)
    }

    #[tracing::instrument(err, skip_all)]
    pub fn get(conn: &mut DbConnection, event_id: EventId) -> Result<Event> {
        let event = events::table
            .filter(events::id.eq(event_id))
            .first(conn)?;

        Ok(event)
    }

    /// Returns the event published under `slug` together with its form settings
    #[tracing::instrument(err, skip_all, fields(%slug))]
    pub fn get_by_slug_with_settings(
        conn: &mut DbConnection,
        slug: &str,
    ) -> Result<(Event, EventSettings)> {
        let query = events::table
            .inner_join(event_settings::table)
            .filter(events::slug.eq(slug))
            .select((events::all_columns, event_settings::all_columns));

        let event_with_settings = query.first(conn)?;

        Ok(event_with_settings)
    }

    /// Returns the event and its settings if it exists and belongs to `owner`
    ///
    /// Events of other owners are reported as [`DatabaseError::NotFound`].
    #[tracing::instrument(err, skip_all)]
    pub fn get_for_owner(
        conn: &mut DbConnection,
        event_id: EventId,
        owner: &str,
    ) -> Result<(Event, EventSettings)> {
        let query = events::table
            .inner_join(event_settings::table)
            .filter(events::id.eq(event_id).and(events::owner.eq(owner)))
            .select((events::all_columns, event_settings::all_columns));

        let event_with_settings = query.first(conn)?;

        Ok(event_with_settings)
    }

    #[tracing::instrument(err, skip_all)]
    pub fn get_all_for_owner(
        conn: &mut DbConnection,
        owner: &str,
    ) -> Result<Vec<(Event, EventSettings)>> {
        let query = events::table
            .inner_join(event_settings::table)
            .filter(events::owner.eq(owner))
            .order(events::created_at.desc())
            .select((events::all_columns, event_settings::all_columns));

        let events = query.load(conn)?;

        Ok(events)
    }

    /// Deletes the event and, through cascading foreign keys, everything attached to it
    #[tracing::instrument(err, skip_all)]
    pub fn delete_for_owner(conn: &mut DbConnection, event_id: EventId, owner: &str) -> Result<()> {
        let deleted = diesel::delete(events::table)
            .filter(events::id.eq(event_id).and(events::owner.eq(owner)))
            .execute(conn)?;

        if deleted == 0 {
            return Err(DatabaseError::NotFound);
        }

        Ok(())
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = events)]
pub struct NewEvent {
    pub slug: String,
    pub owner: String,
    pub event_name: String,
    pub couple_names: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub waze_link: Option<String>,
    pub notes: Option<String>,
    pub is_rsvp_open: bool,
    pub allow_updates: bool,
    pub lock_date: Option<DateTime<Utc>>,
}

impl NewEvent {
    /// Inserts the event together with its settings row
    #[tracing::instrument(err, skip_all)]
    pub fn insert(
        self,
        conn: &mut DbConnection,
        settings: NewEventSettings,
    ) -> Result<(Event, EventSettings)> {
        conn.transaction(|conn| {
            let event: Event = diesel::insert_into(events::table)
                .values(self)
                .get_result(conn)?;

            let settings: EventSettings = diesel::insert_into(event_settings::table)
                .values((event_settings::event_id.eq(event.id), settings))
                .get_result(conn)?;

            Ok((event, settings))
        })
    }
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = events)]
pub struct UpdateEvent {
    pub slug: Option<String>,
    pub event_name: Option<String>,
    pub couple_names: Option<Option<String>>,
    pub date_time: Option<Option<DateTime<Utc>>>,
    pub venue_name: Option<Option<String>>,
    pub venue_address: Option<Option<String>>,
    pub waze_link: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub is_rsvp_open: Option<bool>,
    pub allow_updates: Option<bool>,
    pub lock_date: Option<Option<DateTime<Utc>>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UpdateEvent {
    /// Apply the changeset to the event, touching `updated_at`
    #[tracing::instrument(err, skip_all)]
    pub fn apply(
        mut self,
        conn: &mut DbConnection,
        event_id: EventId,
        owner: &str,
    ) -> Result<Event> {
        self.updated_at = Some(Utc::now());

        let query = diesel::update(events::table)
            .filter(events::id.eq(event_id).and(events::owner.eq(owner)))
            .set(self)
            .returning(events::all_columns);

        let event = query.get_result(conn)?;

        Ok(event)
    }
}

/// Settings of the public RSVP form of an event
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[diesel(table_name = event_settings, primary_key(event_id))]
pub struct EventSettings {
    pub event_id: EventId,
    pub require_phone: bool,
    pub show_meal_choice: bool,
    pub show_allergies: bool,
    pub show_notes: bool,
    pub consent_message: Option<String>,
}

/// Form settings of a new event, the event id is taken from the event row
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = event_settings)]
pub struct NewEventSettings {
    pub require_phone: bool,
    pub show_meal_choice: bool,
    pub show_allergies: bool,
    pub show_notes: bool,
    pub consent_message: Option<String>,
}

impl Default for NewEventSettings {
    fn default() -> Self {
        Self {
            require_phone: false,
            show_meal_choice: false,
            show_allergies: false,
            show_notes: true,
            consent_message: None,
        }
    }
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = event_settings)]
pub struct UpdateEventSettings {
    pub require_phone: Option<bool>,
    pub show_meal_choice: Option<bool>,
    pub show_allergies: Option<bool>,
    pub show_notes: Option<bool>,
    pub consent_message: Option<Option<String>>,
}

impl UpdateEventSettings {
    pub fn is_empty(&self) -> bool {
        self.require_phone.is_none()
            && self.show_meal_choice.is_none()
            && self.show_allergies.is_none()
            && self.show_notes.is_none()
            && self.consent_message.is_none()
    }

    #[tracing::instrument(err, skip_all)]
    pub fn apply(self, conn: &mut DbConnection, event_id: EventId) -> Result<EventSettings> {
        if self.is_empty() {
            let settings = event_settings::table
                .filter(event_settings::event_id.eq(event_id))
                .first(conn)?;

            return Ok(settings);
        }

        let settings = diesel::update(event_settings::table)
            .filter(event_settings::event_id.eq(event_id))
            .set(self)
            .returning(event_settings::all_columns)
            .get_result(conn)?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(lock_date: Option<DateTime<Utc>>) -> Event {
        let now = Utc::now();

        Event {
            id: EventId::generate(),
            slug: "dana-and-noa".into(),
            owner: "owner".into(),
            event_name: "Wedding".into(),
            couple_names: None,
            date_time: None,
            venue_name: None,
            venue_address: None,
            waze_link: None,
            notes: None,
            is_rsvp_open: true,
            allow_updates: true,
            lock_date,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn lock_date_in_the_past_locks() {
        let now = Utc::now();

        assert!(!event(None).is_locked_at(now));
        assert!(!event(Some(now + Duration::hours(1))).is_locked_at(now));
        assert!(event(Some(now - Duration::seconds(1))).is_locked_at(now));
    }

    #[test]
    fn empty_settings_changeset() {
        assert!(UpdateEventSettings::default().is_empty());
        assert!(!UpdateEventSettings {
            consent_message: Some(None),
            ..Default::default()
        }
        .is_empty());
    }
}
