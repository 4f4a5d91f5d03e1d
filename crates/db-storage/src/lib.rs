// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

#![allow(clippy::extra_unused_lifetimes)]

//! Contains the database ORM and database migrations for the guestlist service
//! Builds upon guestlist-database
//!
//! Every entity lives in its own module, holding a queryable record type (e.g. [`rsvps::Rsvp`]),
//! an insertable `New*` type and, where records can be modified, an `Update*` changeset.

mod schema;

pub mod checkins;
pub mod events;
pub mod guests;
pub mod migrations;
pub mod rsvps;
pub mod seatings;
pub mod tables;
