use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::infrastructure::settings::Settings;

/// Wraps the router in a CORS layer built from the configured origin list.
/// A literal `*` entry means any origin; everything else must parse as an
/// origin header value or startup fails.
pub(crate) fn apply_cors(router: Router, settings: &Settings) -> Result<Router> {
    let origin = if settings.cors_origins.iter().any(|entry| entry == "*") {
        AllowOrigin::any()
    } else {
        let origins = settings
            .cors_origins
            .iter()
            .map(|entry| {
                entry
                    .parse::<HeaderValue>()
                    .with_context(|| format!("invalid CORS origin {entry:?}"))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    Ok(router.layer(cors))
}
