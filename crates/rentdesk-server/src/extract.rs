//! Request extractors that reject with [`ApiError`].

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;

use rentdesk_core::enums::Role;
use rentdesk_core::identity::Actor;

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// JSON body whose rejections render as `400 BAD_REQUEST`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string whose rejections render as `400 BAD_REQUEST`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters whose rejections render as `400 BAD_REQUEST`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// The calling identity, read from the `x-user-id` and `x-user-role` headers.
///
/// No authentication happens here; whatever sits in front of the service
/// is trusted to have set both headers.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, USER_ID_HEADER)?
            .parse::<i64>()
            .map_err(|_| ApiError::bad_request(format!("{USER_ID_HEADER} must be an integer")))?;
        let role = parse_role(header(parts, USER_ROLE_HEADER)?)?;
        Ok(Self(Actor::new(user_id, role)))
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, ApiError> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| ApiError::bad_request(format!("missing {name} header")))?
        .to_str()
        .map(str::trim)
        .map_err(|_| ApiError::bad_request(format!("{name} is not valid text")))
}

fn parse_role(raw: &str) -> Result<Role, ApiError> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| ApiError::bad_request(format!("unknown role '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use pretty_assertions::assert_eq;

    async fn extract(headers: &[(&str, &str)]) -> Result<Actor, ApiError> {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        CurrentActor::from_request_parts(&mut parts, &())
            .await
            .map(|CurrentActor(actor)| actor)
    }

    #[tokio::test]
    async fn reads_actor_from_headers() {
        let actor = extract(&[(USER_ID_HEADER, "7"), (USER_ROLE_HEADER, "property_manager")])
            .await
            .unwrap();
        assert_eq!(actor, Actor::new(7, Role::PropertyManager));
    }

    #[tokio::test]
    async fn missing_header_is_bad_request() {
        let err = extract(&[(USER_ROLE_HEADER, "tenant")]).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn unknown_role_is_bad_request() {
        let err = extract(&[(USER_ID_HEADER, "7"), (USER_ROLE_HEADER, "janitor")])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg.contains("janitor")));
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let err = extract(&[(USER_ID_HEADER, "abc"), (USER_ROLE_HEADER, "tenant")])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
