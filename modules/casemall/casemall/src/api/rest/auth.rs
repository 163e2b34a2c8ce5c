//! Caller identity forwarded by the gateway.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::problem::{self, Problem};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The authenticated shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal(pub String);

/// A caller holding the `ADMIN` role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPrincipal(pub String);

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        header(parts, USER_ID_HEADER)
            .map(|id| Self(id.to_owned()))
            .ok_or_else(|| problem::unauthorized(format!("missing {USER_ID_HEADER} header")))
    }
}

impl<S> FromRequestParts<S> for AdminPrincipal
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Principal(user_id) = Principal::from_request_parts(parts, state).await?;
        let is_admin =
            header(parts, USER_ROLE_HEADER).is_some_and(|role| role.eq_ignore_ascii_case("ADMIN"));
        if !is_admin {
            return Err(problem::forbidden("admin role required"));
        }
        Ok(Self(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn principal_requires_user_header() {
        let mut p = parts(&[]);
        let err = Principal::from_request_parts(&mut p, &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        let mut p = parts(&[(USER_ID_HEADER, "alice")]);
        let Principal(id) = Principal::from_request_parts(&mut p, &()).await.unwrap();
        assert_eq!(id, "alice");
    }

    #[tokio::test]
    async fn admin_requires_role() {
        let mut p = parts(&[(USER_ID_HEADER, "bob")]);
        let err = AdminPrincipal::from_request_parts(&mut p, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let mut p = parts(&[(USER_ID_HEADER, "root"), (USER_ROLE_HEADER, "admin")]);
        assert!(AdminPrincipal::from_request_parts(&mut p, &()).await.is_ok());
    }
}
