//! App Router

use std::sync::Arc;

use salvo::{Router, affix_state::inject, size_limiter::max_size};

use crate::{
    calculations, config::security::SecurityConfig, healthcheck, packs, root,
    security::RateLimiter, state::State,
};

/// Routes served under the shared state, body limit and optional rate limit.
pub(crate) fn app_router(state: Arc<State>, security: &SecurityConfig) -> Router {
    let router = Router::new()
        .hoop(inject(state))
        .hoop(max_size(security.max_request_size));

    let router = if security.rate_limit_enabled {
        router.hoop(RateLimiter::per_minute(security.rate_limit_rpm))
    } else {
        router
    };

    router
        .get(root::handler)
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("packs")
                .get(packs::index::handler)
                .put(packs::update::handler)
                .push(Router::with_path("{size}").delete(packs::delete::handler)),
        )
        .push(Router::with_path("calculate").post(calculations::create::handler))
}
