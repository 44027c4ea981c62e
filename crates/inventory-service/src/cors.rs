use axum::http::{HeaderName, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{config::CorsConfig, error::StartupError};

/// Create the CORS layer applied to every route
///
/// Any origin is accepted by echoing the request `Origin` back, which keeps
/// credentialed requests legal (a `*` origin cannot be combined with credentials).
///
/// # Errors
///
/// Returns an error if a configured method or header name does not parse
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, StartupError> {
    let mut methods = Vec::with_capacity(config.allow_methods.len());
    for method in &config.allow_methods {
        let parsed = method
            .parse::<Method>()
            .map_err(|_| StartupError::InvalidCors {
                kind: "method",
                value: method.clone(),
            })?;
        methods.push(parsed);
    }

    let mut headers = Vec::with_capacity(config.allow_headers.len());
    for header in &config.allow_headers {
        let parsed = header
            .parse::<HeaderName>()
            .map_err(|_| StartupError::InvalidCors {
                kind: "header",
                value: header.clone(),
            })?;
        headers.push(parsed);
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(config.allow_credentials)
        .allow_methods(methods)
        .allow_headers(headers))
}
