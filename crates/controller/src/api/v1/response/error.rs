// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Error response type shared by all endpoints
use super::{
    CODE_INVALID_LENGTH, CODE_INVALID_SLUG, CODE_INVALID_URL, CODE_INVALID_VALUE,
    CODE_OUT_OF_RANGE, CODE_VALUE_REQUIRED,
};
use actix_web::error::JsonPayloadError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpRequest;
use actix_web::{body::BoxBody, HttpResponse, ResponseError};
use database::DatabaseError;
use diesel::result::DatabaseErrorKind;
use intake::IntakeError;
use itertools::Itertools;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use validator::ValidationErrors;

/// Error handler for the actix JSON extractor
///
/// Gets called when a incoming request results in an [`JsonPayloadError`].
/// Returns a `Bad Request` [`ApiError`] error with an appropriate error code and message.
pub fn json_error_handler(err: JsonPayloadError, _: &HttpRequest) -> actix_web::error::Error {
    let error_code = match err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "PAYLOAD_OVERFLOW"
        }
        JsonPayloadError::ContentType => "INVALID_CONTENT_TYPE",
        _ => "INVALID_JSON",
    };

    ApiError::bad_request()
        .with_code(error_code)
        .with_message(err.to_string())
        .into()
}

#[derive(Debug, Serialize)]
pub struct ValidationErrorEntry {
    /// The field related to the error, in the casing of the request body
    /// It's a struct level error when no field is set
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<Cow<'static, str>>,
    /// Machine readable error message
    code: Cow<'static, str>,
    /// Human readable error message
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<Cow<'static, str>>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    /// Machine readable error code
    code: Cow<'static, str>,
    /// Human readable message
    error: Cow<'static, str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ValidationErrorEntry>,
}

/// The error response of every endpoint
///
/// Can be build via the associated functions to represent various HTTP errors. Each
/// HTTP error has their default error code and message that get send in a JSON body
/// of the form `{"success": false, "code": "...", "error": "..."}`.
/// The error code and message can be overwritten when creating an error.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new_standard<T>(status: StatusCode, code: T, message: T) -> Self
    where
        T: Into<Cow<'static, str>>,
    {
        Self {
            status,
            body: ErrorBody {
                success: false,
                code: code.into(),
                error: message.into(),
                errors: Vec::new(),
            },
        }
    }

    /// Override the default code for an error
    pub fn with_code<T>(mut self, code: T) -> Self
    where
        T: Into<Cow<'static, str>>,
    {
        self.body.code = code.into();
        self
    }

    /// Override the default message for an error
    pub fn with_message<T>(mut self, message: T) -> Self
    where
        T: Into<Cow<'static, str>>,
    {
        self.body.error = message.into();
        self
    }

    pub fn code(&self) -> &str {
        &self.body.code
    }

    /// Create a new 400 Bad Request error
    pub fn bad_request() -> Self {
        Self::new_standard(
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            "Invalid request due to malformed syntax",
        )
    }

    /// Create a new 401 Unauthorized error
    pub fn unauthorized() -> Self {
        Self::new_standard(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Authentication failed",
        )
    }

    /// Create a new 403 Forbidden error
    pub fn forbidden() -> Self {
        Self::new_standard(
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "Access to the requested resource is forbidden",
        )
    }

    /// Create a new 404 Not Found error
    pub fn not_found() -> Self {
        Self::new_standard(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "A requested resource could not be found",
        )
    }

    /// Create a new 409 Conflict error
    pub fn conflict() -> Self {
        Self::new_standard(
            StatusCode::CONFLICT,
            "CONFLICT",
            "The request conflicts with the state of the resource",
        )
    }

    /// Create a new 400 Bad Request error listing the invalid fields
    ///
    /// This error is normally created from [`ValidationErrors`] from the validator crate.
    pub fn validation_failed<T, I>(errors: I) -> Self
    where
        T: Into<ValidationErrorEntry>,
        I: IntoIterator<Item = T>,
    {
        let mut error = Self::new_standard(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            "Some provided values are invalid",
        );
        error.body.errors = errors.into_iter().map(Into::into).collect();
        error
    }

    /// Create a new 500 Internal Server Error
    pub fn internal() -> Self {
        Self::new_standard(
            StatusCode::INTERNAL_SERVER_ERROR,
            "SERVER_ERROR",
            "An internal server error occurred",
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status={}, code={}, message={}",
            self.status,
            self.code(),
            self.body.error
        )?;

        if !self.body.errors.is_empty() {
            write!(
                f,
                ", errors={}",
                serde_json::to_string(&self.body.errors)
                    .unwrap_or_else(|_| "unserializable errors".to_string())
            )?;
        }

        Ok(())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let mut response = HttpResponse::new(self.status_code());

        response.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        match serde_json::to_string(&self.body) {
            Ok(body) => response.set_body(BoxBody::new(body)),
            Err(e) => {
                log::error!("Unable to serialize API error body: {}", e);
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

impl From<crate::BlockingError> for ApiError {
    fn from(e: crate::BlockingError) -> Self {
        log::error!("REST API threw internal error from blocking error: {}", e);
        Self::internal()
    }
}

impl From<actix_web::Error> for ApiError {
    fn from(e: actix_web::Error) -> Self {
        log::error!("REST API threw internal error from actix web error: {}", e);
        Self::internal()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        log::error!("REST API threw internal error from anyhow error: {:?}", e);
        Self::internal()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(db_error: DatabaseError) -> Self {
        match db_error {
            DatabaseError::NotFound => Self::not_found(),
            DatabaseError::DieselError(diesel::result::Error::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation | DatabaseErrorKind::UniqueViolation,
                _,
            )) => Self::conflict(),
            e => {
                log::error!("REST API threw internal error from database error: {}", e);
                Self::internal()
            }
        }
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(e: diesel::result::Error) -> Self {
        DatabaseError::from(e).into()
    }
}

impl From<IntakeError> for ApiError {
    fn from(e: IntakeError) -> Self {
        let code = e.code();
        let message = e.to_string();

        let error = match e {
            IntakeError::EventNotFound => Self::not_found(),
            IntakeError::RsvpClosed | IntakeError::RsvpLocked => Self::forbidden(),
            IntakeError::PhoneRequired | IntakeError::InvalidJson(_) => Self::bad_request(),
            IntakeError::DuplicateRsvp => Self::conflict(),
            IntakeError::Validation(errors) => return errors.into(),
            IntakeError::Database(e) => {
                log::error!("RSVP intake failed with database error: {}", e);
                return Self::internal();
            }
        };

        error.with_code(code).with_message(message)
    }
}

impl From<ValidationErrors> for ApiError {
    /// Creates a 400 Bad Request response from the [`ValidationErrors`]
    ///
    /// Field names are reported camelCased, the way they appear in the request bodies.
    fn from(validation_errors: ValidationErrors) -> Self {
        let mut entries = Vec::with_capacity(validation_errors.errors().len());

        collect_validation_errors(validation_errors, &mut entries);

        Self::validation_failed(entries)
    }
}

/// Convert [`ValidationErrors`] into multiple [`ValidationErrorEntries`](ValidationErrorEntry) and collect them in `entries`
fn collect_validation_errors(
    validation_errors: ValidationErrors,
    entries: &mut Vec<ValidationErrorEntry>,
) {
    let errors = validation_errors.into_errors();

    // HashMap order is random, keep the output stable
    for (field, error_kind) in errors.into_iter().sorted_by_key(|(field, _)| *field) {
        let field: Option<Cow<'static, str>> = match field {
            "__all__" => None,
            field => Some(camel_case(field).into()),
        };

        match error_kind {
            validator::ValidationErrorsKind::Field(v) => {
                for error in v {
                    let code = convert_validation_code(&error.code);

                    entries.push(ValidationErrorEntry {
                        field: field.clone(),
                        code: Cow::Borrowed(code),
                        message: error.message,
                    });
                }
            }
            validator::ValidationErrorsKind::Struct(inner_errors) => {
                collect_validation_errors(*inner_errors, entries);
            }
            validator::ValidationErrorsKind::List(list) => {
                let invalid_indexes = list.keys().take(15).join(", ");

                entries.push(ValidationErrorEntry {
                    field,
                    code: CODE_INVALID_VALUE.into(),
                    message: Some(Cow::Owned(format!(
                        "Invalid values at index {invalid_indexes}"
                    ))),
                })
            }
        };
    }
}

fn convert_validation_code(code: &str) -> &'static str {
    match code {
        "url" => CODE_INVALID_URL,
        "length" => CODE_INVALID_LENGTH,
        "range" => CODE_OUT_OF_RANGE,
        "required" => CODE_VALUE_REQUIRED,
        "slug" => CODE_INVALID_SLUG,
        _ => CODE_INVALID_VALUE,
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;

    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::body::to_bytes;
    use intake::Submission;
    use test_util::assert_eq_json;
    use validator::{Validate, ValidationError};

    async fn body_json(error: ApiError) -> serde_json::Value {
        let bytes = to_bytes(error.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn standard_error_body() {
        let error = ApiError::conflict()
            .with_code("SLUG_TAKEN")
            .with_message("The slug is already in use");

        assert_eq!(error.status_code(), StatusCode::CONFLICT);
        assert_eq_json!(
            body_json(error).await,
            {
                "success": false,
                "code": "SLUG_TAKEN",
                "error": "The slug is already in use"
            }
        );
    }

    #[actix_web::test]
    async fn intake_errors_map_to_codes() {
        let cases = [
            (IntakeError::EventNotFound, 404, "EVENT_NOT_FOUND"),
            (IntakeError::RsvpClosed, 403, "RSVP_CLOSED"),
            (IntakeError::RsvpLocked, 403, "RSVP_LOCKED"),
            (IntakeError::PhoneRequired, 400, "PHONE_REQUIRED"),
            (IntakeError::DuplicateRsvp, 409, "DUPLICATE_RSVP"),
            (
                IntakeError::InvalidJson(
                    serde_json::from_str::<Submission>(r#"{"attendingCount":"two"}"#).unwrap_err(),
                ),
                400,
                "INVALID_JSON",
            ),
            (
                IntakeError::Database(DatabaseError::Custom("broken".into())),
                500,
                "SERVER_ERROR",
            ),
        ];

        for (intake_error, status, code) in cases {
            let error = ApiError::from(intake_error);

            assert_eq!(error.status_code().as_u16(), status);
            assert_eq!(error.code(), code);
        }
    }

    #[actix_web::test]
    async fn invalid_submission_lists_fields() {
        let submission: Submission = serde_json::from_value(serde_json::json!({
            "fullName": "  ",
            "attendingCount": 51
        }))
        .unwrap();

        let errors = submission.sanitized().validated().unwrap_err();
        let error = ApiError::from(IntakeError::from(errors));

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq_json!(
            body_json(error).await,
            {
                "success": false,
                "code": "VALIDATION_FAILED",
                "error": "Some provided values are invalid",
                "errors": [
                    {
                        "field": "attendingCount",
                        "code": "out_of_range"
                    },
                    {
                        "field": "fullName",
                        "code": "value_required"
                    }
                ]
            }
        );
    }

    #[derive(Validate)]
    struct Named {
        #[validate(custom = "always_fails")]
        table_name: String,
    }

    fn always_fails(_: &str) -> Result<(), ValidationError> {
        Err(ValidationError::new("slug"))
    }

    #[test]
    fn custom_codes_are_converted() {
        let error = ApiError::from(
            Named {
                table_name: "x".into(),
            }
            .validate()
            .unwrap_err(),
        );

        assert_eq!(error.body.errors.len(), 1);
        assert_eq!(error.body.errors[0].code, CODE_INVALID_SLUG);
        assert_eq!(error.body.errors[0].field.as_deref(), Some("tableName"));
    }

    #[test]
    fn database_errors() {
        assert_eq!(
            ApiError::from(DatabaseError::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DatabaseError::Custom("oops".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn camel_cases_field_names() {
        assert_eq!(camel_case("attending_count"), "attendingCount");
        assert_eq!(camel_case("phone"), "phone");
        assert_eq!(camel_case("consent_updates"), "consentUpdates");
    }
}
