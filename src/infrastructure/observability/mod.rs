//! Observability infrastructure - Prometheus metrics

mod metrics;

pub use metrics::{
    create_metrics_router, init_metrics, record_embedding_job, record_http_request,
    record_namespace_bump, record_search, CacheOutcome, PrometheusMetrics,
};
