//! Per-client fixed-window rate limiting on the shared cache store

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::types::ApiError;
use crate::domain::cache::Cache;
use crate::domain::SoftOutcome;

/// Result of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u64 },
    Limited { retry_after_secs: u64 },
    /// The counter store failed; the request goes through
    Unchecked,
}

/// Counts requests per client in `rl:{client}:{window}` counters
///
/// Every process sharing the cache store shares the budget. The counter
/// expires with its window.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    cache: Arc<dyn Cache>,
    requests: u64,
    window: Duration,
}

impl RateLimiter {
    pub fn new(cache: Arc<dyn Cache>, requests: u64, window: Duration) -> Self {
        Self {
            cache,
            requests,
            window: window.max(Duration::from_secs(1)),
        }
    }

    pub async fn check(&self, client: &str) -> RateLimitDecision {
        self.check_at(client, chrono::Utc::now().timestamp().max(0) as u64)
            .await
    }

    async fn check_at(&self, client: &str, now_secs: u64) -> RateLimitDecision {
        let window_secs = self.window.as_secs();
        let window = now_secs / window_secs;
        let key = format!("rl:{}:{}", client, window);

        let count = match self.cache.increment(&key, 1).await {
            Ok(count) => count.max(0) as u64,
            Err(e) => {
                tracing::warn!(client, error = %e, "Rate limit store unavailable, allowing request");
                return RateLimitDecision::Unchecked;
            }
        };

        if count == 1 {
            SoftOutcome::from_result("rate_limit_expire", self.cache.expire(&key, self.window).await);
        }

        if count > self.requests {
            RateLimitDecision::Limited {
                retry_after_secs: (window + 1) * window_secs - now_secs,
            }
        } else {
            RateLimitDecision::Allowed {
                remaining: self.requests - count,
            }
        }
    }
}

/// Rejects over-budget clients with 429
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client = client_id(&request);

    match limiter.check(&client).await {
        RateLimitDecision::Limited { retry_after_secs } => {
            let mut response = ApiError::rate_limited(format!(
                "Rate limit exceeded, retry in {}s",
                retry_after_secs
            ))
            .into_response();
            response
                .headers_mut()
                .insert("retry-after", HeaderValue::from(retry_after_secs));
            response
        }
        RateLimitDecision::Allowed { remaining } => {
            let mut response = next.run(request).await;
            response
                .headers_mut()
                .insert("x-ratelimit-remaining", HeaderValue::from(remaining));
            response
        }
        RateLimitDecision::Unchecked => next.run(request).await,
    }
}

/// Client address: first `x-forwarded-for` hop, then the peer address
fn client_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
