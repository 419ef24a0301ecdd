use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::domain::user::User;
use crate::presentation::AppState;
use crate::presentation::app_error::AppError;

/// The request's authenticated identity, resolved once by the bearer
/// middleware. Read-only and scoped to the request it was attached to.
#[derive(Debug, Clone)]
pub(crate) struct CurrentUser {
    pub(crate) user: User,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Extracts the bearer token and resolves it to a user. A missing or
/// malformed header gets the same response as a bad token.
pub(crate) async fn bearer_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = parse_bearer(request.headers()).ok_or(AppError::Unauthorized)?;

    let user = state
        .identity_service
        .resolve(token)
        .await
        .map_err(|_| AppError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(request).await)
}

fn parse_bearer(headers: &HeaderMap) -> Option<&str> {
    let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut parts = auth_header.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    if token.trim().is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::parse_bearer;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(value).expect("header value must be valid"),
        );
        headers
    }

    #[test]
    fn parse_bearer_accepts_well_formed_header() {
        assert_eq!(parse_bearer(&headers_with("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(parse_bearer(&headers_with("bearer token")), Some("token"));
    }

    #[test]
    fn parse_bearer_rejects_missing_or_malformed_header() {
        assert_eq!(parse_bearer(&HeaderMap::new()), None);
        assert_eq!(parse_bearer(&headers_with("Bearer")), None);
        assert_eq!(parse_bearer(&headers_with("Basic abc")), None);
        assert_eq!(parse_bearer(&headers_with("Bearer a b")), None);
    }
}
