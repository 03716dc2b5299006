//! Security middleware: CORS, response headers, body size and rate limits.

mod headers;
mod rate_limit;

use salvo::{
    cors::{AllowOrigin, Cors, CorsHandler},
    http::{
        Method,
        header::{CONTENT_TYPE, HeaderName},
    },
};

pub(crate) use headers::security_headers;
pub(crate) use rate_limit::RateLimiter;

/// Build the CORS handler for the configured origin, `*` allowing any.
pub(crate) fn cors(origin: &str) -> CorsHandler {
    let cors = if origin.trim() == "*" {
        Cors::new().allow_origin(AllowOrigin::any())
    } else {
        Cors::new().allow_origin(origin.trim())
    };

    cors.allow_methods(vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers(vec![CONTENT_TYPE, HeaderName::from_static("x-request-id")])
    .into_handler()
}
