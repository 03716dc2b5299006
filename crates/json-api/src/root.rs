//! API Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// A single documented route
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EndpointInfo {
    /// HTTP method
    pub method: String,

    /// Route path
    pub path: String,

    /// What the route does
    pub description: String,
}

/// API index response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApiInfoResponse {
    /// API name
    pub name: String,

    /// Server version
    pub version: String,

    /// Short description
    pub description: String,

    /// Available routes
    pub endpoints: Vec<EndpointInfo>,
}

const ENDPOINTS: [(&str, &str, &str); 7] = [
    ("GET", "/healthcheck", "Health check"),
    ("GET", "/metrics", "Prometheus metrics"),
    ("GET", "/packs", "Get current pack sizes"),
    ("PUT", "/packs", "Replace all pack sizes"),
    ("DELETE", "/packs/{size}", "Remove a pack size"),
    ("POST", "/calculate", "Calculate optimal pack distribution"),
    ("GET", "/docs", "Interactive API documentation"),
];

/// API index handler
///
/// Lists the routes this server exposes.
#[endpoint(tags("health"), summary = "API information")]
pub(crate) async fn handler() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        name: "Pack Optimizer API".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        description: "Calculates optimal pack distributions for orders".to_owned(),
        endpoints: ENDPOINTS
            .iter()
            .map(|(method, path, description)| EndpointInfo {
                method: (*method).to_owned(),
                path: (*path).to_owned(),
                description: (*description).to_owned(),
            })
            .collect(),
    })
}
