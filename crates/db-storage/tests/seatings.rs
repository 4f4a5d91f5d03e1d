// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use database::DatabaseError;
use diesel::Connection;
use guestlist_db_storage::checkins::{Checkin, NewCheckin};
use guestlist_db_storage::guests::Guest;
use guestlist_db_storage::rsvps::Rsvp;
use guestlist_db_storage::seatings::{occupied_seats, Seating};
use guestlist_db_storage::tables::EventTable;
use pretty_assertions::assert_eq;
use serial_test::serial;

#[tokio::test]
#[serial]
#[ignore = "requires a running postgres"]
async fn occupants_carry_party_sizes() {
    let db_ctx = test_util::database::DatabaseContext::new(true).await;

    let (event, _) = db_ctx.create_test_event("dana-and-noa", "alice").unwrap();
    let table = db_ctx.create_test_table(event.id, "Family", 10).unwrap();
    let rsvp = db_ctx.create_test_rsvp(event.id, "Rina", 4).unwrap();
    let declined = db_ctx.create_test_rsvp(event.id, "Avi", 0).unwrap();
    let guest = db_ctx.create_test_guest(event.id, "Yossi", None).unwrap();

    db_ctx.seat(event.id, table.id, None, Some(rsvp.id)).unwrap();
    db_ctx.seat(event.id, table.id, None, Some(declined.id)).unwrap();
    db_ctx.seat(event.id, table.id, Some(guest.id), None).unwrap();

    let mut conn = db_ctx.db.get_conn().unwrap();

    let occupants = Seating::get_occupants_of_table(&mut conn, table.id).unwrap();

    assert_eq!(occupants.len(), 3);
    assert_eq!(occupied_seats(&occupants), 6);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running postgres"]
async fn reassigned_seat_survives_guest_deletion() {
    let db_ctx = test_util::database::DatabaseContext::new(true).await;

    let (event, _) = db_ctx.create_test_event("dana-and-noa", "alice").unwrap();
    let table = db_ctx.create_test_table(event.id, "Family", 10).unwrap();
    let guest = db_ctx.create_test_guest(event.id, "Yossi", None).unwrap();
    let seating = db_ctx.seat(event.id, table.id, Some(guest.id), None).unwrap();
    let rsvp = db_ctx.create_test_rsvp(event.id, "Yossi", 2).unwrap();

    let mut conn = db_ctx.db.get_conn().unwrap();

    conn.transaction::<_, DatabaseError, _>(|conn| {
        let locked = EventTable::get_for_update(conn, table.id)?;
        assert_eq!(locked.capacity, 10);

        Seating::reassign_to_rsvp(conn, seating.id, rsvp.id)?;
        Guest::delete_by_id(conn, guest.id)
    })
    .unwrap();

    let moved = Seating::get_for_rsvp(&mut conn, rsvp.id).unwrap().unwrap();
    assert_eq!(moved.id, seating.id);
    assert_eq!(moved.table_id, table.id);
    assert_eq!(moved.guest_id, None);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running postgres"]
async fn second_checkin_is_rejected() {
    let db_ctx = test_util::database::DatabaseContext::new(true).await;

    let (event, _) = db_ctx.create_test_event("dana-and-noa", "alice").unwrap();
    let rsvp = db_ctx.create_test_rsvp(event.id, "Rina", 2).unwrap();

    let mut conn = db_ctx.db.get_conn().unwrap();

    NewCheckin {
        event_id: event.id,
        rsvp_id: rsvp.id,
    }
    .insert(&mut conn)
    .unwrap();

    let err = NewCheckin {
        event_id: event.id,
        rsvp_id: rsvp.id,
    }
    .insert(&mut conn)
    .unwrap_err();
    assert!(err.is_unique_violation());

    let listed = Rsvp::get_all_with_checkin(&mut conn, event.id).unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].1.is_some());

    Checkin::delete_for_rsvp(&mut conn, event.id, rsvp.id).unwrap();
    assert!(matches!(
        Checkin::delete_for_rsvp(&mut conn, event.id, rsvp.id),
        Err(DatabaseError::NotFound)
    ));
}
