// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! RSVP ingestion for the public RSVP form
//!
//! A submission is matched against the existing RSVPs and pre-registered guests of the event
//! ([`resolver`]). A pre-registered guest who already holds a seat keeps it only if the declared
//! party still fits the table ([`reconciler`]). [`submit_rsvp`] runs the whole sequence inside a
//! single transaction of an [`IntakeStore`].

mod error;
#[cfg(test)]
mod memory;
pub mod reconciler;
pub mod resolver;
mod store;
mod submission;
mod writer;

pub use error::IntakeError;
pub use reconciler::SeatDecision;
pub use store::IntakeStore;
pub use submission::{Submission, SubmissionBody, ValidSubmission, MAX_PARTY_SIZE};
pub use writer::{merge_comment, submit_rsvp, IntakeContext, IntakeOutcome};
