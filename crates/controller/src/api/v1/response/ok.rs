// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Success response types
//!
//! These all implement the [`Responder`] trait.

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder};
use serde::Serialize;

/// A JSON response with a status code of the 2xx class
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    status: StatusCode,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Responds with `200 OK`
    pub fn new(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    /// Responds with `201 Created`
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = BoxBody;

    fn respond_to(self, _: &actix_web::HttpRequest) -> HttpResponse<Self::Body> {
        match serde_json::to_string(&self.data) {
            Ok(body) => HttpResponse::build(self.status)
                .content_type(mime::APPLICATION_JSON)
                .body(body),
            Err(e) => {
                log::error!("Failed to serialize response body: {}", e);
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}
