//! Admin guard.
//!
//! Reads the caller's role from the `x-user-role` header and runs it through
//! `motor_core::authorize`. Used as the first extractor of every mutating
//! handler, so a rejected caller never gets as far as body or query parsing.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::debug;

use motor_core::{authorize, Role, ROLE_HEADER};

use crate::error::ApiError;

/// Proof that the request came from an admin.
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard(pub Role);

/// The role label sent with the request, if any.
///
/// An empty header counts as absent. A value that is not valid header text
/// is passed on as an unknown role.
pub fn role_label(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(ROLE_HEADER)
        .map(|value| value.to_str().unwrap_or("\u{fffd}"))
        .filter(|label| !label.is_empty())
}

impl<S> FromRequestParts<S> for AdminGuard
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role = authorize(role_label(parts), Role::Admin).map_err(|denied| {
            debug!(uri = %parts.uri, reason = %denied, "Admin guard rejected request");
            ApiError::from(denied)
        })?;

        Ok(AdminGuard(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn guard(role: Option<&str>) -> Result<AdminGuard, ApiError> {
        let mut builder = Request::builder().uri("/product");
        if let Some(role) = role {
            builder = builder.header(ROLE_HEADER, role);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AdminGuard::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_admin_passes() {
        let AdminGuard(role) = guard(Some("admin")).await.unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[tokio::test]
    async fn test_missing_and_empty_header() {
        for role in [None, Some("")] {
            let err = guard(role).await.unwrap_err();
            assert_eq!(err.to_string(), "x-user-role header is missing");
        }
    }

    #[tokio::test]
    async fn test_non_admin_roles() {
        for role in ["user", "Admin", "root"] {
            let err = guard(Some(role)).await.unwrap_err();
            assert_eq!(err.to_string(), "Admin role required");
        }
    }
}
