// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! This module contains types that are considered to be in the core of the guestlist service.
//!
//! All core types are simple types (e.g. newtypes of primitive or other simple types),
//! and typically used by other types in this crate.

mod checkin_id;
mod event_id;
mod guest_id;
mod normalized_phone;
mod rsvp_id;
mod rsvp_status;
mod seating_id;
mod table_id;

pub use checkin_id::CheckinId;
pub use event_id::EventId;
pub use guest_id::GuestId;
pub use normalized_phone::NormalizedPhone;
pub use rsvp_id::RsvpId;
pub use rsvp_status::{RsvpStatus, SubmissionOutcome};
pub use seating_id::SeatingId;
pub use table_id::TableId;
