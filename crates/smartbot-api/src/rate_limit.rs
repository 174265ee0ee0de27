//! Fixed-window rate limiter middleware.
//!
//! Counts requests per wall-clock second with atomics and rejects with
//! 429 once the window's budget is spent.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Extension, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ErrorBody;

/// Shared state for the rate limiter.
///
/// The window (low 32 bits of the unix second) and the count taken in it
/// live in one word, so a window rollover and the first permit of the new
/// window are a single compare-exchange.
#[derive(Clone)]
pub struct RateLimiter {
    max_per_sec: u64,
    state: Arc<AtomicU64>,
}

const COUNT_MASK: u64 = 0xFFFF_FFFF;

impl RateLimiter {
    /// Allow `max_per_sec` requests per second.
    pub fn new(max_per_sec: u64) -> Self {
        Self {
            max_per_sec,
            state: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Try to take a permit in the window starting at `now_secs`.
    pub fn try_acquire_at(&self, now_secs: u64) -> bool {
        let window = now_secs & COUNT_MASK;
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let count = if current >> 32 == window {
                current & COUNT_MASK
            } else {
                0
            };
            if count >= self.max_per_sec || count == COUNT_MASK {
                return false;
            }
            let next = (window << 32) | (count + 1);
            match self
                .state
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }

    fn try_acquire(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.try_acquire_at(now)
    }
}

/// Axum middleware that enforces the rate limit.
pub async fn rate_limit_middleware(
    Extension(limiter): Extension<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    if limiter.try_acquire() {
        return next.run(req).await;
    }
    tracing::warn!(path = %req.uri().path(), "Rate limit exceeded");
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorBody {
            error: "too_many_requests".to_string(),
            message: "Rate limit exceeded".to_string(),
        }),
    )
        .into_response()
}
