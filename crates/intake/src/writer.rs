// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::reconciler::{reconcile, SeatDecision};
use crate::resolver::{resolve, Identity, Match};
use crate::{IntakeError, IntakeStore, SubmissionBody, ValidSubmission};
use chrono::{DateTime, Utc};
use db_storage::events::Event;
use db_storage::guests::Guest;
use db_storage::rsvps::{NewRsvp, Rsvp, UpdateRsvp};
use db_storage::seatings::Seating;
use phonenumber::country;
use types::core::{NormalizedPhone, RsvpStatus, SubmissionOutcome};

/// Environment of a submission
#[derive(Debug, Clone, Copy)]
pub struct IntakeContext {
    /// Region for phone numbers without country prefix
    pub default_region: country::Id,
    /// Point in time the submission is judged at
    pub now: DateTime<Utc>,
}

/// Result of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeOutcome {
    pub outcome: SubmissionOutcome,
    pub rsvp: Rsvp,
    /// Set if a seat of the submitting party was re-evaluated
    pub seat: Option<SeatDecision>,
}

impl IntakeOutcome {
    pub fn status(&self) -> RsvpStatus {
        self.rsvp.status()
    }

    /// Message shown to the submitting guest
    pub fn message(&self) -> &'static str {
        match (self.outcome, self.status()) {
            (SubmissionOutcome::Updated, _) => "Your RSVP has been updated",
            (SubmissionOutcome::Created, RsvpStatus::Attending) => {
                "Thank you, your RSVP has been received"
            }
            (SubmissionOutcome::Created, RsvpStatus::Declined) => {
                "Thank you for letting us know you can't make it"
            }
        }
    }
}

/// Appends `note` to `comment`, separated by a blank line
pub fn merge_comment(comment: Option<String>, note: Option<String>) -> Option<String> {
    match (comment, note) {
        (Some(comment), Some(note)) => Some(format!("{comment}\n\n{note}")),
        (comment, note) => comment.or(note),
    }
}

/// Records a public RSVP submission for the event published under `slug`
///
/// Event policy is checked before the payload: an unknown event and a closed or locked form reject
/// the submission before its body is even decoded, a missing required phone before the content
/// is validated.
#[tracing::instrument(skip(store, submission, ctx))]
pub fn submit_rsvp<S: IntakeStore, B: SubmissionBody>(
    store: &mut S,
    slug: &str,
    submission: B,
    ctx: &IntakeContext,
) -> Result<IntakeOutcome, IntakeError> {
    store.transaction(|store| {
        let (event, settings) = store
            .event_by_slug(slug)?
            .ok_or(IntakeError::EventNotFound)?;

        if !event.is_rsvp_open {
            return Err(IntakeError::RsvpClosed);
        }

        if event.is_locked_at(ctx.now) {
            return Err(IntakeError::RsvpLocked);
        }

        let submission = submission.into_submission()?.sanitized();

        let phone = submission
            .phone
            .as_deref()
            .and_then(|raw| NormalizedPhone::normalize(raw, ctx.default_region));

        if settings.require_phone && phone.is_none() {
            return Err(IntakeError::PhoneRequired);
        }

        let submission = submission.validated()?;

        let identity = Identity {
            full_name: &submission.full_name,
            raw_phone: submission.phone.as_deref(),
            phone: phone.as_ref(),
        };

        match resolve(store, event.id, identity)? {
            Match::Rsvp(existing) => {
                if !event.allow_updates {
                    log::debug!("Rejecting duplicate RSVP {} for event {}", existing.id, event.id);
                    return Err(IntakeError::DuplicateRsvp);
                }

                update_existing(store, existing, submission, phone, ctx.now)
            }
            Match::Guest(guest) => convert_guest(store, &event, guest, submission, phone),
            Match::None => {
                let rsvp = store.insert_rsvp(new_rsvp(&event, submission, phone, None))?;

                log::info!("Created RSVP {} for event {}", rsvp.id, event.id);

                Ok(IntakeOutcome {
                    outcome: SubmissionOutcome::Created,
                    rsvp,
                    seat: None,
                })
            }
        }
    })
}

/// Re-evaluates `seating` for a party of `attending_count`, releasing the seat if it no longer fits
fn reconcile_seat<S: IntakeStore>(
    store: &mut S,
    seating: &Seating,
    attending_count: i32,
) -> Result<SeatDecision, IntakeError> {
    let table = store.lock_table(seating.table_id)?;
    let occupants = store.table_occupants(table.id)?;

    let decision = reconcile(&table, seating, &occupants, attending_count);

    if decision.is_evicted() {
        store.delete_seating(seating.id)?;
        log::info!(
            "Released seating {} at table {}, party of {} does not fit",
            seating.id,
            table.id,
            attending_count
        );
    }

    Ok(decision)
}

/// Replaces a pre-registered guest by a new RSVP, moving or releasing the guest's seat
fn convert_guest<S: IntakeStore>(
    store: &mut S,
    event: &Event,
    guest: Guest,
    submission: ValidSubmission,
    phone: Option<NormalizedPhone>,
) -> Result<IntakeOutcome, IntakeError> {
    let seat = match store.seating_of_guest(guest.id)? {
        Some(seating) => Some(reconcile_seat(store, &seating, submission.attending_count)?),
        None => None,
    };

    let note = seat.as_ref().and_then(SeatDecision::eviction_note);
    let rsvp = store.insert_rsvp(new_rsvp(event, submission, phone, note))?;

    // The seat has to point to the RSVP before the guest goes, deleting the guest cascades
    if let Some(seat) = seat.as_ref().filter(|seat| !seat.is_evicted()) {
        store.reassign_seating(seat.seating_id(), rsvp.id)?;
    }

    store.delete_guest(guest.id)?;

    log::info!(
        "Converted guest {} into RSVP {} for event {}",
        guest.id,
        rsvp.id,
        event.id
    );

    Ok(IntakeOutcome {
        outcome: SubmissionOutcome::Created,
        rsvp,
        seat,
    })
}

fn update_existing<S: IntakeStore>(
    store: &mut S,
    existing: Rsvp,
    submission: ValidSubmission,
    phone: Option<NormalizedPhone>,
    now: DateTime<Utc>,
) -> Result<IntakeOutcome, IntakeError> {
    let seat = match store.seating_of_rsvp(existing.id)? {
        Some(seating) => Some(reconcile_seat(store, &seating, submission.attending_count)?),
        None => None,
    };

    let changeset = UpdateRsvp {
        full_name: submission.full_name,
        phone: phone.map(NormalizedPhone::into_inner).or(existing.phone),
        attending_count: submission.attending_count,
        meal_choice: submission.meal_choice,
        allergies: submission.allergies,
        comment: merge_comment(
            submission.comment,
            seat.as_ref().and_then(SeatDecision::eviction_note),
        ),
        consent_updates: submission.consent_updates,
        updated_at: now,
    };

    let rsvp = store.update_rsvp(existing.id, changeset)?;

    log::info!("Updated RSVP {}", rsvp.id);

    Ok(IntakeOutcome {
        outcome: SubmissionOutcome::Updated,
        rsvp,
        seat,
    })
}

fn new_rsvp(
    event: &Event,
    submission: ValidSubmission,
    phone: Option<NormalizedPhone>,
    note: Option<String>,
) -> NewRsvp {
    NewRsvp {
        event_id: event.id,
        full_name: submission.full_name,
        phone: phone.map(NormalizedPhone::into_inner),
        attending_count: submission.attending_count,
        meal_choice: submission.meal_choice,
        allergies: submission.allergies,
        comment: merge_comment(submission.comment, note),
        consent_updates: submission.consent_updates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_and_note() {
        assert_eq!(merge_comment(None, None), None);
        assert_eq!(
            merge_comment(Some("See you!".into()), None).as_deref(),
            Some("See you!")
        );
        assert_eq!(
            merge_comment(None, Some("note".into())).as_deref(),
            Some("note")
        );
        assert_eq!(
            merge_comment(Some("See you!".into()), Some("note".into())).as_deref(),
            Some("See you!\n\nnote")
        );
    }
}
