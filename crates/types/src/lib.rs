// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Data types for the guestlist service.
//!
//! Contains the identifier newtypes stored through the ORM, the phone number normalization
//! used to match RSVP submissions and the small enums that appear on the wire.

#![deny(
    bad_style,
    missing_debug_implementations,
    missing_docs,
    overflowing_literals,
    patterns_in_fns_without_body,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]

mod macros;

pub mod core;
