//! Hardening headers added to every response.

use salvo::{
    http::header::{HeaderName, HeaderValue},
    prelude::*,
};

const HEADERS: [(&str, &str); 4] = [
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("content-security-policy", "default-src 'self'"),
];

/// Swagger UI pulls scripts and styles from outside the API origin.
const DOCS_PREFIX: &str = "/docs";

#[handler]
pub(crate) async fn security_headers(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let docs = req.uri().path().starts_with(DOCS_PREFIX);

    ctrl.call_next(req, depot, res).await;

    for (name, value) in HEADERS {
        if docs && name == "content-security-policy" {
            continue;
        }

        res.headers_mut().insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}
