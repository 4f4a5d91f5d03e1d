// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::ApiError;
use crate::settings::SharedSettingsActix;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures::future::{ready, Ready};

/// Identity of the event owner issuing the request
///
/// Authentication happens in the proxy in front of the service, which forwards the
/// authenticated identity in the header configured as `http.owner_header`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(String);

impl Owner {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromRequest for Owner {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract_owner(req))
    }
}

fn extract_owner(req: &HttpRequest) -> Result<Owner, ApiError> {
    let settings = req.app_data::<SharedSettingsActix>().ok_or_else(|| {
        log::error!("Settings are missing from the app data");
        ApiError::internal()
    })?;

    let header_name = settings.load().http.owner_header.clone();

    let owner = req
        .headers()
        .get(header_name.as_str())
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|owner| !owner.is_empty())
        .ok_or_else(|| ApiError::unauthorized().with_message("Missing owner identity"))?;

    Ok(Owner(owner.to_owned()))
}
