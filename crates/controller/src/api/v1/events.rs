// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Event related API structs and Endpoints
use super::owner::Owner;
use super::response::{ApiError, NoContent};
use super::util::{deserialize_some, trimmed, validate_slug};
use super::ApiResponse;
use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, patch, post, Either};
use chrono::{DateTime, Utc};
use database::{DatabaseError, Db};
use db_storage::events::{
    Event, EventSettings, NewEvent, NewEventSettings, UpdateEvent, UpdateEventSettings,
};
use diesel::Connection;
use serde::{Deserialize, Serialize};
use types::core::EventId;
use validator::Validate;

/// An event as seen by its owner
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResource {
    pub id: EventId,
    pub slug: String,
    pub event_name: String,
    pub couple_names: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub waze_link: Option<String>,
    pub notes: Option<String>,
    pub is_rsvp_open: bool,
    pub allow_updates: bool,
    pub lock_date: Option<DateTime<Utc>>,
    pub settings: EventSettingsResource,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventResource {
    fn from_db(event: Event, settings: EventSettings) -> Self {
        Self {
            id: event.id,
            slug: event.slug,
            event_name: event.event_name,
            couple_names: event.couple_names,
            date_time: event.date_time,
            venue_name: event.venue_name,
            venue_address: event.venue_address,
            waze_link: event.waze_link,
            notes: event.notes,
            is_rsvp_open: event.is_rsvp_open,
            allow_updates: event.allow_updates,
            lock_date: event.lock_date,
            settings: EventSettingsResource::from(settings),
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// Which fields the public RSVP form shows
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSettingsResource {
    pub require_phone: bool,
    pub show_meal_choice: bool,
    pub show_allergies: bool,
    pub show_notes: bool,
    pub consent_message: Option<String>,
}

impl From<EventSettings> for EventSettingsResource {
    fn from(settings: EventSettings) -> Self {
        Self {
            require_phone: settings.require_phone,
            show_meal_choice: settings.show_meal_choice,
            show_allergies: settings.show_allergies,
            show_notes: settings.show_notes,
            consent_message: settings.consent_message,
        }
    }
}

/// Body of the `POST /events` endpoint
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostEventsBody {
    #[validate(custom = "validate_slug")]
    pub slug: String,
    #[validate(length(min = 1, max = 200))]
    pub event_name: String,
    #[validate(length(max = 200))]
    pub couple_names: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    #[validate(length(max = 200))]
    pub venue_name: Option<String>,
    #[validate(length(max = 500))]
    pub venue_address: Option<String>,
    #[validate(url)]
    pub waze_link: Option<String>,
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_rsvp_open: bool,
    #[serde(default = "default_true")]
    pub allow_updates: bool,
    pub lock_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub require_phone: bool,
    #[serde(default)]
    pub show_meal_choice: bool,
    #[serde(default)]
    pub show_allergies: bool,
    #[serde(default = "default_true")]
    pub show_notes: bool,
    #[validate(length(max = 1000))]
    pub consent_message: Option<String>,
}

fn default_true() -> bool {
    true
}

/// API Endpoint *POST /events*
///
/// Creates a new event owned by the requesting owner. A slug in use by any other event is
/// rejected with `SLUG_TAKEN`.
#[post("/events")]
pub async fn new_event(
    db: Data<Db>,
    owner: Owner,
    body: Json<PostEventsBody>,
) -> Result<ApiResponse<EventResource>, ApiError> {
    let body = body.into_inner();

    body.validate()?;

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        let new_event = NewEvent {
            slug: body.slug,
            owner: owner.into_inner(),
            event_name: body.event_name.trim().to_owned(),
            couple_names: trimmed(body.couple_names),
            date_time: body.date_time,
            venue_name: trimmed(body.venue_name),
            venue_address: trimmed(body.venue_address),
            waze_link: trimmed(body.waze_link),
            notes: trimmed(body.notes),
            is_rsvp_open: body.is_rsvp_open,
            allow_updates: body.allow_updates,
            lock_date: body.lock_date,
        };

        let settings = NewEventSettings {
            require_phone: body.require_phone,
            show_meal_choice: body.show_meal_choice,
            show_allergies: body.show_allergies,
            show_notes: body.show_notes,
            consent_message: trimmed(body.consent_message),
        };

        let (event, settings) = new_event
            .insert(&mut conn, settings)
            .map_err(slug_taken)?;

        Ok(ApiResponse::created(EventResource::from_db(event, settings)))
    })
    .await?
}

/// API Endpoint *GET /events*
///
/// Returns all events of the requesting owner, newest first
#[get("/events")]
pub async fn get_events(
    db: Data<Db>,
    owner: Owner,
) -> Result<ApiResponse<Vec<EventResource>>, ApiError> {
    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        let events = Event::get_all_for_owner(&mut conn, owner.as_str())?;

        let events: Vec<_> = events
            .into_iter()
            .map(|(event, settings)| EventResource::from_db(event, settings))
            .collect();

        Ok(ApiResponse::new(events))
    })
    .await?
}

/// API Endpoint *GET /events/{event_id}*
#[get("/events/{event_id}")]
pub async fn get_event(
    db: Data<Db>,
    owner: Owner,
    event_id: Path<EventId>,
) -> Result<ApiResponse<EventResource>, ApiError> {
    let event_id = event_id.into_inner();

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        let (event, settings) = Event::get_for_owner(&mut conn, event_id, owner.as_str())?;

        Ok(ApiResponse::new(EventResource::from_db(event, settings)))
    })
    .await?
}

/// Body for the `PATCH /events/{event_id}` endpoint
///
/// Nullable fields can be cleared by sending `null`, absent fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatchEventBody {
    #[validate(custom = "validate_slug")]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub event_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub couple_names: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub date_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub venue_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub venue_address: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub waze_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
    pub is_rsvp_open: Option<bool>,
    pub allow_updates: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub lock_date: Option<Option<DateTime<Utc>>>,
    pub require_phone: Option<bool>,
    pub show_meal_choice: Option<bool>,
    pub show_allergies: Option<bool>,
    pub show_notes: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub consent_message: Option<Option<String>>,
}

impl PatchEventBody {
    fn is_empty(&self) -> bool {
        let PatchEventBody {
            slug,
            event_name,
            couple_names,
            date_time,
            venue_name,
            venue_address,
            waze_link,
            notes,
            is_rsvp_open,
            allow_updates,
            lock_date,
            require_phone,
            show_meal_choice,
            show_allergies,
            show_notes,
            consent_message,
        } = self;

        slug.is_none()
            && event_name.is_none()
            && couple_names.is_none()
            && date_time.is_none()
            && venue_name.is_none()
            && venue_address.is_none()
            && waze_link.is_none()
            && notes.is_none()
            && is_rsvp_open.is_none()
            && allow_updates.is_none()
            && lock_date.is_none()
            && require_phone.is_none()
            && show_meal_choice.is_none()
            && show_allergies.is_none()
            && show_notes.is_none()
            && consent_message.is_none()
    }

    fn into_changesets(self) -> (UpdateEvent, UpdateEventSettings) {
        let event = UpdateEvent {
            slug: self.slug,
            event_name: self.event_name.map(|name| name.trim().to_owned()),
            couple_names: self.couple_names.map(trimmed),
            date_time: self.date_time,
            venue_name: self.venue_name.map(trimmed),
            venue_address: self.venue_address.map(trimmed),
            waze_link: self.waze_link.map(trimmed),
            notes: self.notes.map(trimmed),
            is_rsvp_open: self.is_rsvp_open,
            allow_updates: self.allow_updates,
            lock_date: self.lock_date,
            updated_at: None,
        };

        let settings = UpdateEventSettings {
            require_phone: self.require_phone,
            show_meal_choice: self.show_meal_choice,
            show_allergies: self.show_allergies,
            show_notes: self.show_notes,
            consent_message: self.consent_message.map(trimmed),
        };

        (event, settings)
    }
}

/// API Endpoint *PATCH /events/{event_id}*
///
/// Responds with `204 No Content` when the body contains no changes.
#[patch("/events/{event_id}")]
pub async fn patch_event(
    db: Data<Db>,
    owner: Owner,
    event_id: Path<EventId>,
    patch: Json<PatchEventBody>,
) -> Result<Either<ApiResponse<EventResource>, NoContent>, ApiError> {
    let event_id = event_id.into_inner();
    let patch = patch.into_inner();

    if patch.is_empty() {
        return Ok(Either::Right(NoContent));
    }

    patch.validate()?;

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        conn.transaction::<_, ApiError, _>(|conn| {
            // Check ownership before touching the settings, which are keyed by event only
            Event::get_for_owner(conn, event_id, owner.as_str())?;

            let (update_event, update_settings) = patch.into_changesets();

            let event = update_event
                .apply(conn, event_id, owner.as_str())
                .map_err(slug_taken)?;
            let settings = update_settings.apply(conn, event_id)?;

            Ok(Either::Left(ApiResponse::new(EventResource::from_db(
                event, settings,
            ))))
        })
    })
    .await?
}

/// API Endpoint *DELETE /events/{event_id}*
///
/// Deletes the event with its guests, RSVPs, tables, seatings and check-ins
#[delete("/events/{event_id}")]
pub async fn delete_event(
    db: Data<Db>,
    owner: Owner,
    event_id: Path<EventId>,
) -> Result<NoContent, ApiError> {
    let event_id = event_id.into_inner();

    crate::block(move || -> Result<_, ApiError> {
        let mut conn = db.get_conn()?;

        Event::delete_for_owner(&mut conn, event_id, owner.as_str())?;

        Ok(NoContent)
    })
    .await?
}

fn slug_taken(e: DatabaseError) -> ApiError {
    if e.is_unique_violation() {
        ApiError::conflict()
            .with_code("SLUG_TAKEN")
            .with_message("The slug is already used by another event")
    } else {
        e.into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn post_body_defaults() {
        let body: PostEventsBody = serde_json::from_value(serde_json::json!({
            "slug": "dana-and-noa",
            "eventName": "Dana & Noa"
        }))
        .unwrap();

        assert!(body.validate().is_ok());
        assert!(body.is_rsvp_open);
        assert!(body.allow_updates);
        assert!(body.show_notes);
        assert!(!body.require_phone);
        assert_eq!(body.lock_date, None);
    }

    #[test]
    fn post_body_rejects_bad_slug_and_link() {
        let body: PostEventsBody = serde_json::from_value(serde_json::json!({
            "slug": "Dana & Noa",
            "eventName": "Dana & Noa",
            "wazeLink": "not a link"
        }))
        .unwrap();

        let errors = body.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("slug"));
        assert!(fields.contains_key("waze_link"));
        assert!(!fields.contains_key("event_name"));
    }

    #[test]
    fn patch_body_distinguishes_null_from_absent() {
        let patch: PatchEventBody = serde_json::from_value(serde_json::json!({
            "notes": null,
            "requirePhone": true
        }))
        .unwrap();

        assert!(!patch.is_empty());

        let (event, settings) = patch.into_changesets();

        assert_eq!(event.notes, Some(None));
        assert_eq!(event.venue_name, None);
        assert_eq!(settings.require_phone, Some(true));
        assert_eq!(settings.consent_message, None);
    }

    #[test]
    fn empty_patch() {
        let patch: PatchEventBody = serde_json::from_str("{}").unwrap();

        assert!(patch.is_empty());
    }
}
