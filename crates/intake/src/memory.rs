// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! In-memory [`IntakeStore`] mirroring the constraints of the database schema

use crate::{IntakeError, IntakeStore};
use chrono::{DateTime, Duration, Utc};
use database::{DatabaseError, Result};
use db_storage::events::{Event, EventSettings};
use db_storage::guests::Guest;
use db_storage::rsvps::{NewRsvp, Rsvp, UpdateRsvp};
use db_storage::seatings::{Seating, TableOccupant};
use db_storage::tables::EventTable;
use std::time::SystemTime;
use types::core::{EventId, GuestId, RsvpId, SeatingId, TableId};

#[derive(Debug, Clone, Default)]
struct State {
    events: Vec<(Event, EventSettings)>,
    guests: Vec<Guest>,
    rsvps: Vec<Rsvp>,
    tables: Vec<EventTable>,
    seatings: Vec<Seating>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: State,
    ticks: i64,
    /// Tables locked in the current transaction
    pub locked_tables: Vec<TableId>,
}

impl MemoryStore {
    fn now(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        DateTime::<Utc>::from(SystemTime::UNIX_EPOCH) + Duration::seconds(self.ticks)
    }

    pub fn add_event(
        &mut self,
        slug: &str,
        configure: impl FnOnce(&mut Event, &mut EventSettings),
    ) -> Event {
        let now = self.now();
        let id = EventId::generate();

        let mut event = Event {
            id,
            slug: slug.into(),
            owner: "owner".into(),
            event_name: "Wedding".into(),
            couple_names: Some("Dana & Noa".into()),
            date_time: None,
            venue_name: None,
            venue_address: None,
            waze_link: None,
            notes: None,
            is_rsvp_open: true,
            allow_updates: true,
            lock_date: None,
            created_at: now,
            updated_at: now,
        };
        let mut settings = EventSettings {
            event_id: id,
            require_phone: false,
            show_meal_choice: false,
            show_allergies: false,
            show_notes: true,
            consent_message: None,
        };

        configure(&mut event, &mut settings);

        self.state.events.push((event.clone(), settings));
        event
    }

    pub fn add_guest(&mut self, event_id: EventId, full_name: &str, phone: Option<&str>) -> Guest {
        let guest = Guest {
            id: GuestId::generate(),
            event_id,
            full_name: full_name.into(),
            phone: phone.map(Into::into),
            side: None,
            group_name: None,
            created_at: self.now(),
        };

        self.state.guests.push(guest.clone());
        guest
    }

    pub fn add_rsvp(
        &mut self,
        event_id: EventId,
        full_name: &str,
        phone: Option<&str>,
        attending_count: i32,
    ) -> Rsvp {
        self.insert_rsvp(NewRsvp {
            event_id,
            full_name: full_name.into(),
            phone: phone.map(Into::into),
            attending_count,
            meal_choice: None,
            allergies: None,
            comment: None,
            consent_updates: false,
        })
        .expect("in-memory insert cannot fail")
    }

    pub fn add_table(&mut self, event_id: EventId, name: &str, capacity: i32) -> EventTable {
        let table = EventTable {
            id: TableId::generate(),
            event_id,
            name: name.into(),
            capacity,
            created_at: self.now(),
        };

        self.state.tables.push(table.clone());
        table
    }

    pub fn seat(
        &mut self,
        table: &EventTable,
        guest_id: Option<GuestId>,
        rsvp_id: Option<RsvpId>,
    ) -> Seating {
        assert!(guest_id.is_some() != rsvp_id.is_some());

        let seating = Seating {
            id: SeatingId::generate(),
            event_id: table.event_id,
            table_id: table.id,
            guest_id,
            rsvp_id,
            seat_number: Some(3),
            created_at: self.now(),
        };

        self.state.seatings.push(seating.clone());
        seating
    }

    pub fn rsvps(&self) -> &[Rsvp] {
        &self.state.rsvps
    }

    pub fn guests(&self) -> &[Guest] {
        &self.state.guests
    }

    pub fn seatings(&self) -> &[Seating] {
        &self.state.seatings
    }
}

impl IntakeStore for MemoryStore {
    fn transaction<T, F>(&mut self, f: F) -> Result<T, IntakeError>
    where
        F: FnOnce(&mut Self) -> Result<T, IntakeError>,
    {
        let snapshot = self.state.clone();
        self.locked_tables.clear();

        let result = f(self);

        if result.is_err() {
            self.state = snapshot;
        }

        result
    }

    fn event_by_slug(&mut self, slug: &str) -> Result<Option<(Event, EventSettings)>> {
        Ok(self
            .state
            .events
            .iter()
            .find(|(event, _)| event.slug == slug)
            .cloned())
    }

    fn rsvp_by_phone(&mut self, event_id: EventId, phone: &str) -> Result<Option<Rsvp>> {
        Ok(self
            .state
            .rsvps
            .iter()
            .find(|r| r.event_id == event_id && r.phone.as_deref() == Some(phone))
            .cloned())
    }

    fn rsvp_by_name(&mut self, event_id: EventId, full_name: &str) -> Result<Option<Rsvp>> {
        Ok(self
            .state
            .rsvps
            .iter()
            .find(|r| r.event_id == event_id && r.full_name == full_name)
            .cloned())
    }

    fn guest_by_phone(&mut self, event_id: EventId, phone: &str) -> Result<Option<Guest>> {
        Ok(self
            .state
            .guests
            .iter()
            .find(|g| g.event_id == event_id && g.phone.as_deref() == Some(phone))
            .cloned())
    }

    fn guest_by_name(&mut self, event_id: EventId, full_name: &str) -> Result<Option<Guest>> {
        Ok(self
            .state
            .guests
            .iter()
            .find(|g| g.event_id == event_id && g.full_name == full_name)
            .cloned())
    }

    fn seating_of_guest(&mut self, guest_id: GuestId) -> Result<Option<Seating>> {
        Ok(self
            .state
            .seatings
            .iter()
            .find(|s| s.guest_id == Some(guest_id))
            .cloned())
    }

    fn seating_of_rsvp(&mut self, rsvp_id: RsvpId) -> Result<Option<Seating>> {
        Ok(self
            .state
            .seatings
            .iter()
            .find(|s| s.rsvp_id == Some(rsvp_id))
            .cloned())
    }

    fn lock_table(&mut self, table_id: TableId) -> Result<EventTable> {
        let table = self
            .state
            .tables
            .iter()
            .find(|t| t.id == table_id)
            .cloned()
            .ok_or(DatabaseError::NotFound)?;

        self.locked_tables.push(table_id);

        Ok(table)
    }

    fn table_occupants(&mut self, table_id: TableId) -> Result<Vec<TableOccupant>> {
        let rsvps = &self.state.rsvps;

        Ok(self
            .state
            .seatings
            .iter()
            .filter(|s| s.table_id == table_id)
            .map(|seating| TableOccupant {
                seating: seating.clone(),
                attending_count: seating.rsvp_id.and_then(|rsvp_id| {
                    rsvps
                        .iter()
                        .find(|r| r.id == rsvp_id)
                        .map(|r| r.attending_count)
                }),
            })
            .collect())
    }

    fn insert_rsvp(&mut self, new_rsvp: NewRsvp) -> Result<Rsvp> {
        let now = self.now();

        let rsvp = Rsvp {
            id: RsvpId::generate(),
            event_id: new_rsvp.event_id,
            full_name: new_rsvp.full_name,
            phone: new_rsvp.phone,
            attending_count: new_rsvp.attending_count,
            meal_choice: new_rsvp.meal_choice,
            allergies: new_rsvp.allergies,
            comment: new_rsvp.comment,
            consent_updates: new_rsvp.consent_updates,
            created_at: now,
            updated_at: now,
        };

        self.state.rsvps.push(rsvp.clone());
        Ok(rsvp)
    }

    fn update_rsvp(&mut self, rsvp_id: RsvpId, changeset: UpdateRsvp) -> Result<Rsvp> {
        let rsvp = self
            .state
            .rsvps
            .iter_mut()
            .find(|r| r.id == rsvp_id)
            .ok_or(DatabaseError::NotFound)?;

        rsvp.full_name = changeset.full_name;
        rsvp.phone = changeset.phone;
        rsvp.attending_count = changeset.attending_count;
        rsvp.meal_choice = changeset.meal_choice;
        rsvp.allergies = changeset.allergies;
        rsvp.comment = changeset.comment;
        rsvp.consent_updates = changeset.consent_updates;
        rsvp.updated_at = changeset.updated_at;

        Ok(rsvp.clone())
    }

    fn reassign_seating(&mut self, seating_id: SeatingId, rsvp_id: RsvpId) -> Result<Seating> {
        if !self.state.rsvps.iter().any(|r| r.id == rsvp_id) {
            return Err(DatabaseError::Custom("seating references unknown rsvp".into()));
        }

        let seating = self
            .state
            .seatings
            .iter_mut()
            .find(|s| s.id == seating_id)
            .ok_or(DatabaseError::NotFound)?;

        seating.guest_id = None;
        seating.rsvp_id = Some(rsvp_id);

        Ok(seating.clone())
    }

    fn delete_seating(&mut self, seating_id: SeatingId) -> Result<()> {
        let before = self.state.seatings.len();
        self.state.seatings.retain(|s| s.id != seating_id);

        if self.state.seatings.len() == before {
            return Err(DatabaseError::NotFound);
        }

        Ok(())
    }

    fn delete_guest(&mut self, guest_id: GuestId) -> Result<()> {
        let before = self.state.guests.len();
        self.state.guests.retain(|g| g.id != guest_id);

        if self.state.guests.len() == before {
            return Err(DatabaseError::NotFound);
        }

        // ON DELETE CASCADE
        self.state.seatings.retain(|s| s.guest_id != Some(guest_id));

        Ok(())
    }
}
