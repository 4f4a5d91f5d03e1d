// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use database::DatabaseError;
use guestlist_db_storage::events::{Event, UpdateEvent, UpdateEventSettings};
use pretty_assertions::assert_eq;
use serial_test::serial;

#[tokio::test]
#[serial]
#[ignore = "requires a running postgres"]
async fn events_are_scoped_to_their_owner() {
    let db_ctx = test_util::database::DatabaseContext::new(true).await;

    let (event, settings) = db_ctx.create_test_event("dana-and-noa", "alice").unwrap();
    db_ctx.create_test_event("other-wedding", "bob").unwrap();

    let mut conn = db_ctx.db.get_conn().unwrap();

    let (by_slug, by_slug_settings) =
        Event::get_by_slug_with_settings(&mut conn, "dana-and-noa").unwrap();
    assert_eq!(by_slug, event);
    assert_eq!(by_slug_settings, settings);

    let owned = Event::get_all_for_owner(&mut conn, "alice").unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].0.id, event.id);

    assert!(matches!(
        Event::get_for_owner(&mut conn, event.id, "bob"),
        Err(DatabaseError::NotFound)
    ));
    assert!(matches!(
        Event::delete_for_owner(&mut conn, event.id, "bob"),
        Err(DatabaseError::NotFound)
    ));
}

#[tokio::test]
#[serial]
#[ignore = "requires a running postgres"]
async fn duplicate_slug_is_a_unique_violation() {
    let db_ctx = test_util::database::DatabaseContext::new(true).await;

    db_ctx.create_test_event("dana-and-noa", "alice").unwrap();
    let err = db_ctx
        .create_test_event("dana-and-noa", "bob")
        .unwrap_err()
        .downcast::<DatabaseError>()
        .unwrap();

    assert!(err.is_unique_violation());
}

#[tokio::test]
#[serial]
#[ignore = "requires a running postgres"]
async fn update_event_and_settings() {
    let db_ctx = test_util::database::DatabaseContext::new(true).await;

    let (event, _) = db_ctx.create_test_event("dana-and-noa", "alice").unwrap();

    let mut conn = db_ctx.db.get_conn().unwrap();

    let updated = UpdateEvent {
        is_rsvp_open: Some(false),
        notes: Some(Some("Dress code: white".into())),
        ..Default::default()
    }
    .apply(&mut conn, event.id, "alice")
    .unwrap();

    assert!(!updated.is_rsvp_open);
    assert_eq!(updated.notes.as_deref(), Some("Dress code: white"));
    assert!(updated.updated_at >= event.updated_at);

    let settings = UpdateEventSettings {
        require_phone: Some(true),
        ..Default::default()
    }
    .apply(&mut conn, event.id)
    .unwrap();
    assert!(settings.require_phone);

    let unchanged = UpdateEventSettings::default()
        .apply(&mut conn, event.id)
        .unwrap();
    assert_eq!(unchanged, settings);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running postgres"]
async fn deleting_an_event_cascades() {
    let db_ctx = test_util::database::DatabaseContext::new(true).await;

    let (event, _) = db_ctx.create_test_event("dana-and-noa", "alice").unwrap();
    let table = db_ctx.create_test_table(event.id, "Family", 10).unwrap();
    let guest = db_ctx.create_test_guest(event.id, "Yossi", None).unwrap();
    db_ctx.seat(event.id, table.id, Some(guest.id), None).unwrap();

    let mut conn = db_ctx.db.get_conn().unwrap();

    Event::delete_for_owner(&mut conn, event.id, "alice").unwrap();

    assert!(
        guestlist_db_storage::guests::Guest::get_all_for_event(&mut conn, event.id)
            .unwrap()
            .is_empty()
    );
    assert!(
        guestlist_db_storage::seatings::Seating::get_all_for_event(&mut conn, event.id)
            .unwrap()
            .is_empty()
    );
}
