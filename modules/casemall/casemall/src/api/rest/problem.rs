//! RFC 9457 Problem Details responses.

use axum::extract::{OriginalUri, Request};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Problem bodies are small; anything larger is passed through untouched.
const PROBLEM_BODY_LIMIT: usize = 64 * 1024;

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

/// RFC 9457 Problem Details for HTTP APIs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(title = "Problem", description = "RFC 9457 Problem Details for HTTP APIs")]
#[must_use]
pub struct Problem {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    #[schema(value_type = u16)]
    pub status: StatusCode,
    pub detail: String,
    /// Request path this problem occurred on.
    pub instance: String,
    /// Machine-readable error code, e.g. `OUT_OF_STOCK`.
    pub code: String,
    pub trace_id: Option<String>,
    /// Field level violations for 422 responses.
    pub errors: Option<Vec<ValidationViolation>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationViolation {
    pub field: String,
    pub message: String,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status,
            detail: detail.into(),
            instance: String::new(),
            code: String::new(),
            trace_id: None,
            errors: None,
        }
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = uri.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_errors(mut self, errors: Vec<ValidationViolation>) -> Self {
        self.errors = Some(errors);
        self
    }
}

pub fn bad_request(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::BAD_REQUEST, "Bad Request", detail).with_code("BAD_REQUEST")
}

pub fn unauthorized(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized", detail).with_code("UNAUTHORIZED")
}

pub fn forbidden(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::FORBIDDEN, "Forbidden", detail).with_code("FORBIDDEN")
}

pub fn not_found(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::NOT_FOUND, "Not Found", detail).with_code("NOT_FOUND")
}

pub fn conflict(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::CONFLICT, "Conflict", detail).with_code("CONFLICT")
}

pub fn unprocessable(field: impl Into<String>, message: impl Into<String>) -> Problem {
    let field = field.into();
    let message = message.into();
    Problem::new(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Validation Failed",
        format!("{field}: {message}"),
    )
    .with_code("VALIDATION_ERROR")
    .with_errors(vec![ValidationViolation { field, message }])
}

pub fn internal_error(detail: impl Into<String>) -> Problem {
    Problem::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        detail,
    )
    .with_code("INTERNAL_ERROR")
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status;
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}

fn is_problem_response(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with(APPLICATION_PROBLEM_JSON))
}

fn extract_trace_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-request-id")
        .or_else(|| headers.get("x-trace-id"))
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Fills `instance` and `trace_id` on problem responses from the request.
pub async fn problem_context_middleware(request: Request, next: Next) -> Response {
    // nested routers see a stripped uri
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map_or_else(|| request.uri().path(), |u| u.path())
        .to_owned();
    let trace_id = extract_trace_id(request.headers());

    let response = next.run(request).await;
    let status = response.status();
    let is_problem = is_problem_response(&response);
    if !is_problem && !status.is_client_error() {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, PROBLEM_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable error body");
            return internal_error("failed to render error").into_response();
        }
    };

    if !is_problem {
        // extractor rejections come back as plain text
        let title = status.canonical_reason().unwrap_or("Error");
        let mut problem = Problem::new(status, title, String::from_utf8_lossy(&bytes))
            .with_code(title.to_ascii_uppercase().replace(' ', "_"))
            .with_instance(path);
        problem.trace_id = trace_id;
        return problem.into_response();
    }

    match serde_json::from_slice::<Problem>(&bytes) {
        Ok(mut problem) => {
            if problem.instance.is_empty() {
                problem.instance = path;
            }
            if problem.trace_id.is_none() {
                problem.trace_id = trace_id;
            }
            problem.into_response()
        }
        Err(_) => Response::from_parts(parts, axum::body::Body::from(bytes)),
    }
}
