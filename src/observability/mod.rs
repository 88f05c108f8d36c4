//! Observability module for the QR client.
//!
//! Instrumentation itself is plain `tracing`; this module only configures the
//! subscriber and keeps sensitive values out of log fields.

mod logging;

pub use logging::{init_logging, mask_account, LogConfig, LogFormat, LogLevel};
