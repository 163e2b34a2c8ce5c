use axum::Json;
use axum::http::{HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::problem::Problem;

pub type JsonBody<T> = Json<T>;

/// Handler result: a JSON body or an RFC 9457 problem.
pub type ApiResult<T> = Result<T, Problem>;

/// 201 Created with a `Location` of `<request path>/<new_id>`.
pub fn created_json<T: Serialize>(value: T, uri: &Uri, new_id: &str) -> impl IntoResponse + use<T> {
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), new_id);
    let mut resp: Response = (StatusCode::CREATED, Json(value)).into_response();
    if let Ok(v) = HeaderValue::from_str(&location) {
        resp.headers_mut().insert(header::LOCATION, v);
    }
    resp
}

pub fn no_content() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_json_sets_location_without_double_slash() {
        let uri: Uri = "/casemall/v1/users/".parse().unwrap();
        let resp = created_json(serde_json::json!({"ok": true}), &uri, "alice").into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/casemall/v1/users/alice"
        );
    }
}
