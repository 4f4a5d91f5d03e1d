// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Owner API
//!
//! Management of events, their guest lists, tables, seatings and check-ins. Every endpoint
//! requires the [`Owner`](owner::Owner) extracted from the forwarded owner header and only ever
//! touches events of that owner. Events of other owners are reported as not found.

pub mod checkins;
pub mod events;
pub mod guests;
pub mod owner;
pub mod response;
pub mod rsvps;
pub mod seatings;
pub mod tables;
mod util;

pub use response::{ApiError, ApiResponse};
