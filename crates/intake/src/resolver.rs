// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::IntakeStore;
use database::Result;
use db_storage::guests::Guest;
use db_storage::rsvps::Rsvp;
use types::core::{EventId, NormalizedPhone};

/// The record a submission corresponds to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    /// The guest answered before
    Rsvp(Rsvp),
    /// A pre-registered guest answers for the first time
    Guest(Guest),
    None,
}

/// Identity of a submission as used for matching
#[derive(Debug, Clone, Copy)]
pub struct Identity<'a> {
    /// Trimmed full name, compared exactly
    pub full_name: &'a str,
    /// Phone as submitted
    pub raw_phone: Option<&'a str>,
    pub phone: Option<&'a NormalizedPhone>,
}

/// Finds the existing RSVP or pre-registered guest a submission belongs to
///
/// With a phone the RSVP is matched by normalized phone, a guest by exact name, then by the raw
/// and the normalized phone. Without a phone both are matched by exact name only. A phone without
/// digits has no normalized form, its RSVP is matched by name but a guest still by the raw phone.
#[tracing::instrument(level = "debug", err, skip_all)]
pub fn resolve<S: IntakeStore>(
    store: &mut S,
    event_id: EventId,
    identity: Identity<'_>,
) -> Result<Match> {
    let phone = identity.phone.map(NormalizedPhone::as_str);

    let rsvp = match phone {
        Some(phone) => store.rsvp_by_phone(event_id, phone)?,
        None => store.rsvp_by_name(event_id, identity.full_name)?,
    };

    if let Some(rsvp) = rsvp {
        return Ok(Match::Rsvp(rsvp));
    }

    if let Some(guest) = store.guest_by_name(event_id, identity.full_name)? {
        return Ok(Match::Guest(guest));
    }

    if let Some(raw_phone) = identity.raw_phone {
        if let Some(guest) = store.guest_by_phone(event_id, raw_phone)? {
            return Ok(Match::Guest(guest));
        }
    }

    if let Some(phone) = phone.filter(|phone| identity.raw_phone != Some(*phone)) {
        if let Some(guest) = store.guest_by_phone(event_id, phone)? {
            return Ok(Match::Guest(guest));
        }
    }

    Ok(Match::None)
}
