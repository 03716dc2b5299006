//! Fixed-window request rate limiting keyed by client address.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use salvo::{
    http::header::{HeaderValue, RETRY_AFTER},
    prelude::*,
};
use tracing::warn;

const WINDOW: Duration = Duration::from_secs(60);

/// Windows are swept once the table grows past this many clients.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u64,
}

/// Outcome of counting one request against its client's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    Allowed,
    Limited { retry_after: Duration },
}

/// Per-client request limiter, shared across clones.
#[derive(Debug, Clone)]
pub(crate) struct RateLimiter {
    limit: u64,
    window: Duration,
    clients: Arc<Mutex<HashMap<String, Window>>>,
}

impl RateLimiter {
    /// Allow `requests_per_minute` requests per client per minute.
    pub(crate) fn per_minute(requests_per_minute: u64) -> Self {
        Self::new(requests_per_minute, WINDOW)
    }

    fn new(limit: u64, window: Duration) -> Self {
        Self {
            limit,
            window,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn admit(&self, client: &str, now: Instant) -> Admission {
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);

        if clients.len() > SWEEP_THRESHOLD {
            clients.retain(|_, window| now.duration_since(window.started) < self.window);
        }

        let window = clients.entry(client.to_owned()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.window {
            *window = Window {
                started: now,
                count: 0,
            };
        }

        if window.count >= self.limit {
            let elapsed = now.duration_since(window.started);

            return Admission::Limited {
                retry_after: self.window.saturating_sub(elapsed),
            };
        }

        window.count += 1;

        Admission::Allowed
    }
}

#[handler]
impl RateLimiter {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let client = client_key(req);

        match self.admit(&client, Instant::now()) {
            Admission::Allowed => {
                ctrl.call_next(req, depot, res).await;
            }
            Admission::Limited { retry_after } => {
                warn!(client = %client, "rate limit exceeded");

                // Round up so clients never retry inside the current window.
                let seconds = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);

                res.headers_mut()
                    .insert(RETRY_AFTER, HeaderValue::from(seconds.max(1)));
                res.render(
                    StatusError::too_many_requests()
                        .brief("too many requests, please try again later"),
                );

                ctrl.skip_rest();
            }
        }
    }
}

/// First `X-Forwarded-For` hop, then `X-Real-IP`, then the peer address.
fn client_key(req: &Request) -> String {
    let forwarded = req
        .header::<String>("x-forwarded-for")
        .and_then(|value| value.split(',').next().map(|hop| hop.trim().to_owned()))
        .filter(|hop| !hop.is_empty());

    if let Some(forwarded) = forwarded {
        return forwarded;
    }

    if let Some(real_ip) = req
        .header::<String>("x-real-ip")
        .filter(|value| !value.trim().is_empty())
    {
        return real_ip.trim().to_owned();
    }

    let addr = req.remote_addr();

    if let Some(addr) = addr.as_ipv4() {
        return addr.ip().to_string();
    }

    if let Some(addr) = addr.as_ipv6() {
        return addr.ip().to_string();
    }

    "unknown".to_owned()
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};

    use super::*;

    #[handler]
    async fn ok() -> &'static str {
        "ok"
    }

    fn service(limiter: RateLimiter) -> Service {
        Service::new(Router::with_path("calculate").post(ok)).hoop(limiter)
    }

    #[test]
    fn requests_beyond_the_limit_are_refused_until_the_window_resets() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let start = Instant::now();

        assert_eq!(limiter.admit("10.0.0.1", start), Admission::Allowed);
        assert_eq!(limiter.admit("10.0.0.1", start), Admission::Allowed);
        assert_eq!(
            limiter.admit("10.0.0.1", start + Duration::from_secs(15)),
            Admission::Limited {
                retry_after: Duration::from_secs(45)
            }
        );

        assert_eq!(
            limiter.admit("10.0.0.1", start + Duration::from_secs(60)),
            Admission::Allowed
        );
    }

    #[test]
    fn clients_are_counted_separately() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        assert_eq!(limiter.admit("10.0.0.1", now), Admission::Allowed);
        assert_eq!(limiter.admit("10.0.0.2", now), Admission::Allowed);
        assert!(matches!(
            limiter.admit("10.0.0.1", now),
            Admission::Limited { .. }
        ));
    }

    #[tokio::test]
    async fn admitted_requests_reach_the_handler() -> testresult::TestResult {
        let service = service(RateLimiter::per_minute(5));

        let mut response = TestClient::post("http://example.com/calculate")
            .add_header("x-real-ip", "192.0.2.10", true)
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::OK));
        assert_eq!(response.take_string().await?, "ok");

        Ok(())
    }

    #[tokio::test]
    async fn limited_requests_get_429_with_retry_after() {
        let service = service(RateLimiter::per_minute(1));

        let first = TestClient::post("http://example.com/calculate")
            .add_header("x-forwarded-for", "203.0.113.7, 10.0.0.1", true)
            .send(&service)
            .await;

        let second = TestClient::post("http://example.com/calculate")
            .add_header("x-forwarded-for", "203.0.113.7", true)
            .send(&service)
            .await;

        let other = TestClient::post("http://example.com/calculate")
            .add_header("x-real-ip", "198.51.100.2", true)
            .send(&service)
            .await;

        assert_eq!(first.status_code, Some(StatusCode::OK));
        assert_eq!(second.status_code, Some(StatusCode::TOO_MANY_REQUESTS));
        assert!(
            second.headers().contains_key(RETRY_AFTER),
            "expected retry-after header"
        );
        assert_eq!(other.status_code, Some(StatusCode::OK));
    }
}
