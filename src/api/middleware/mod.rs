//! API middleware components

pub mod logging;
pub mod metrics;
pub mod rate_limit;
pub mod timeout;

pub use logging::{logging_middleware, REQUEST_ID_HEADER};
pub use metrics::metrics_middleware;
pub use rate_limit::{rate_limit_middleware, RateLimitDecision, RateLimiter};
pub use timeout::timeout_middleware;
