//! Tokengate Observability
//!
//! - [`logging`]: console subscriber setup and the per-request logging middleware
//! - [`metrics`]: Prometheus recorder and authentication counters
//!
//! Metrics can be switched off at runtime with `OBSERVABILITY_ENABLED=false`;
//! the counter helpers then become no-ops.

pub mod logging;
pub mod metrics;

pub use self::logging::{init_basic_console_logging, logging_middleware};
pub use self::metrics::{
    PrometheusHandle, init_metrics, is_observability_enabled, track_jwt_issued,
    track_token_rejected, track_user_created, track_user_login_failure, track_user_login_success,
};
