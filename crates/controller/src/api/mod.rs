// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! HTTP endpoints
//!
//! [`rsvp`] is the unauthenticated surface used by the public RSVP form, [`v1`] the
//! owner facing management API.

pub mod rsvp;
pub mod v1;
