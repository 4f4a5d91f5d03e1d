// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::IntakeError;
use database::{DbConnection, OptionalExt, Result};
use db_storage::events::{Event, EventSettings};
use db_storage::guests::Guest;
use db_storage::rsvps::{NewRsvp, Rsvp, UpdateRsvp};
use db_storage::seatings::{Seating, TableOccupant};
use db_storage::tables::EventTable;
use types::core::{EventId, GuestId, RsvpId, SeatingId, TableId};

/// Storage operations the intake needs
///
/// Implemented for [`DbConnection`]. Lookups by name or phone return the oldest match.
pub trait IntakeStore {
    /// Runs `f` atomically, nothing `f` wrote persists if it returns an error
    fn transaction<T, F>(&mut self, f: F) -> Result<T, IntakeError>
    where
        F: FnOnce(&mut Self) -> Result<T, IntakeError>;

    fn event_by_slug(&mut self, slug: &str) -> Result<Option<(Event, EventSettings)>>;

    fn rsvp_by_phone(&mut self, event_id: EventId, phone: &str) -> Result<Option<Rsvp>>;
    fn rsvp_by_name(&mut self, event_id: EventId, full_name: &str) -> Result<Option<Rsvp>>;

    fn guest_by_phone(&mut self, event_id: EventId, phone: &str) -> Result<Option<Guest>>;
    fn guest_by_name(&mut self, event_id: EventId, full_name: &str) -> Result<Option<Guest>>;

    fn seating_of_guest(&mut self, guest_id: GuestId) -> Result<Option<Seating>>;
    fn seating_of_rsvp(&mut self, rsvp_id: RsvpId) -> Result<Option<Seating>>;

    /// Loads the table and locks it until the surrounding transaction ends
    fn lock_table(&mut self, table_id: TableId) -> Result<EventTable>;
    fn table_occupants(&mut self, table_id: TableId) -> Result<Vec<TableOccupant>>;

    fn insert_rsvp(&mut self, new_rsvp: NewRsvp) -> Result<Rsvp>;
    fn update_rsvp(&mut self, rsvp_id: RsvpId, changeset: UpdateRsvp) -> Result<Rsvp>;

    fn reassign_seating(&mut self, seating_id: SeatingId, rsvp_id: RsvpId) -> Result<Seating>;
    fn delete_seating(&mut self, seating_id: SeatingId) -> Result<()>;
    fn delete_guest(&mut self, guest_id: GuestId) -> Result<()>;
}

impl IntakeStore for DbConnection {
    fn transaction<T, F>(&mut self, f: F) -> Result<T, IntakeError>
    where
        F: FnOnce(&mut Self) -> Result<T, IntakeError>,
    {
        diesel::Connection::transaction(self, f)
    }

    fn event_by_slug(&mut self, slug: &str) -> Result<Option<(Event, EventSettings)>> {
        Event::get_by_slug_with_settings(self, slug).optional()
    }

    fn rsvp_by_phone(&mut self, event_id: EventId, phone: &str) -> Result<Option<Rsvp>> {
        Rsvp::find_by_phone(self, event_id, phone)
    }

    fn rsvp_by_name(&mut self, event_id: EventId, full_name: &str) -> Result<Option<Rsvp>> {
        Rsvp::find_by_name(self, event_id, full_name)
    }

    fn guest_by_phone(&mut self, event_id: EventId, phone: &str) -> Result<Option<Guest>> {
        Guest::find_by_phone(self, event_id, phone)
    }

    fn guest_by_name(&mut self, event_id: EventId, full_name: &str) -> Result<Option<Guest>> {
        Guest::find_by_name(self, event_id, full_name)
    }

    fn seating_of_guest(&mut self, guest_id: GuestId) -> Result<Option<Seating>> {
        Seating::get_for_guest(self, guest_id)
    }

    fn seating_of_rsvp(&mut self, rsvp_id: RsvpId) -> Result<Option<Seating>> {
        Seating::get_for_rsvp(self, rsvp_id)
    }

    fn lock_table(&mut self, table_id: TableId) -> Result<EventTable> {
        EventTable::get_for_update(self, table_id)
    }

    fn table_occupants(&mut self, table_id: TableId) -> Result<Vec<TableOccupant>> {
        Seating::get_occupants_of_table(self, table_id)
    }

    fn insert_rsvp(&mut self, new_rsvp: NewRsvp) -> Result<Rsvp> {
        new_rsvp.insert(self)
    }

    fn update_rsvp(&mut self, rsvp_id: RsvpId, changeset: UpdateRsvp) -> Result<Rsvp> {
        changeset.apply(self, rsvp_id)
    }

    fn reassign_seating(&mut self, seating_id: SeatingId, rsvp_id: RsvpId) -> Result<Seating> {
        Seating::reassign_to_rsvp(self, seating_id, rsvp_id)
    }

    fn delete_seating(&mut self, seating_id: SeatingId) -> Result<()> {
        Seating::delete_by_id(self, seating_id)
    }

    fn delete_guest(&mut self, guest_id: GuestId) -> Result<()> {
        Guest::delete_by_id(self, guest_id)
    }
}
