// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Shared settings for the guestlist service.
//! Kept apart from the controller so the storage and intake crates can read them without
//! pulling in the web stack.

pub mod settings;
