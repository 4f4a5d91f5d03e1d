// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use db_storage::seatings::{occupied_seats, Seating, TableOccupant};
use db_storage::tables::EventTable;
use types::core::{SeatingId, TableId};

/// What happens to the seat of a party whose size changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatDecision {
    /// The party still fits, the seat is kept
    Retain {
        seating_id: SeatingId,
        table_id: TableId,
    },
    /// The party no longer fits, the seat is released
    Evict {
        seating_id: SeatingId,
        table_id: TableId,
        table_name: String,
        available: i32,
        requested: i32,
    },
}

impl SeatDecision {
    pub fn seating_id(&self) -> SeatingId {
        match self {
            SeatDecision::Retain { seating_id, .. } | SeatDecision::Evict { seating_id, .. } => {
                *seating_id
            }
        }
    }

    pub fn is_evicted(&self) -> bool {
        matches!(self, SeatDecision::Evict { .. })
    }

    /// Note explaining a released seat, meant for the RSVP comment
    pub fn eviction_note(&self) -> Option<String> {
        match self {
            SeatDecision::Retain { .. } => None,
            SeatDecision::Evict {
                table_name,
                available,
                requested,
                ..
            } => {
                let available = (*available).max(0);

                Some(format!(
                    "Seat at table \"{table_name}\" was released: a party of {requested} needs {} more seat(s) than the {available} left.",
                    requested - available
                ))
            }
        }
    }
}

/// Decides whether `seating` at `table` can hold a party of `attending_count`
///
/// `occupants` are all seatings at the table, the seating under review itself is left out of the
/// occupied sum.
pub fn reconcile(
    table: &EventTable,
    seating: &Seating,
    occupants: &[TableOccupant],
    attending_count: i32,
) -> SeatDecision {
    let occupied = occupied_seats(occupants.iter().filter(|o| o.seating.id != seating.id));
    let available = table.capacity - occupied;

    if attending_count <= available {
        SeatDecision::Retain {
            seating_id: seating.id,
            table_id: table.id,
        }
    } else {
        SeatDecision::Evict {
            seating_id: seating.id,
            table_id: table.id,
            table_name: table.name.clone(),
            available,
            requested: attending_count,
        }
    }
}
