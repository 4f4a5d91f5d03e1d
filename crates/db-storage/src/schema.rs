// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

// Keep in sync with src/migrations

diesel::table! {
    checkins (id) {
        id -> Uuid,
        event_id -> Uuid,
        rsvp_id -> Uuid,
        checked_in_at -> Timestamptz,
    }
}

diesel::table! {
    event_settings (event_id) {
        event_id -> Uuid,
        require_phone -> Bool,
        show_meal_choice -> Bool,
        show_allergies -> Bool,
        show_notes -> Bool,
        consent_message -> Nullable<Text>,
    }
}

diesel::table! {
    event_tables (id) {
        id -> Uuid,
        event_id -> Uuid,
        name -> Text,
        capacity -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    events (id) {
        id -> Uuid,
        slug -> Text,
        owner -> Text,
        event_name -> Text,
        couple_names -> Nullable<Text>,
        date_time -> Nullable<Timestamptz>,
        venue_name -> Nullable<Text>,
        venue_address -> Nullable<Text>,
        waze_link -> Nullable<Text>,
        notes -> Nullable<Text>,
        is_rsvp_open -> Bool,
        allow_updates -> Bool,
        lock_date -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    guests (id) {
        id -> Uuid,
        event_id -> Uuid,
        full_name -> Text,
        phone -> Nullable<Text>,
        side -> Nullable<Text>,
        group_name -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    rsvps (id) {
        id -> Uuid,
        event_id -> Uuid,
        full_name -> Text,
        phone -> Nullable<Text>,
        attending_count -> Int4,
        meal_choice -> Nullable<Text>,
        allergies -> Nullable<Text>,
        comment -> Nullable<Text>,
        consent_updates -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    seatings (id) {
        id -> Uuid,
        event_id -> Uuid,
        table_id -> Uuid,
        guest_id -> Nullable<Uuid>,
        rsvp_id -> Nullable<Uuid>,
        seat_number -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(checkins -> rsvps (rsvp_id));
diesel::joinable!(event_settings -> events (event_id));
diesel::joinable!(event_tables -> events (event_id));
diesel::joinable!(guests -> events (event_id));
diesel::joinable!(rsvps -> events (event_id));
diesel::joinable!(seatings -> event_tables (table_id));
diesel::joinable!(seatings -> guests (guest_id));
diesel::joinable!(seatings -> rsvps (rsvp_id));

diesel::allow_tables_to_appear_in_same_query!(
    checkins,
    event_settings,
    event_tables,
    events,
    guests,
    rsvps,
    seatings,
);
