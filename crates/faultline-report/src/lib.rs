//! Faultline Report
//!
//! Turns [`faultline_core::AppError`] chains into monitoring-service events
//! and delivers them. Exceptions are listed root cause first, the
//! fingerprint is the logger name followed by each link's code, and the
//! level is `fatal` when any link was marked as a panic.
//!
//! ```rust,no_run
//! use faultline_core::AppError;
//! use faultline_report::{ReportConfig, Reporter};
//!
//! # async fn run() -> faultline_report::ReportResult<()> {
//! let reporter = Reporter::from_config(ReportConfig::from_env()?.with_release("1.0.0"))?;
//! let err = AppError::unavailable("DB_DOWN", "database unavailable");
//! reporter.capture_and_wait(&err).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dsn;
pub mod error;
pub mod event;

pub use client::{HttpClient, ReportClient, Reporter, TracingClient};
pub use config::{DEFAULT_LOGGER, ReportConfig, global};
pub use dsn::Dsn;
pub use error::{ReportError, ReportResult};
pub use event::{
    Event, EventFrame, EventStacktrace, Exception, ExceptionList, InputAnnotation, Level, User,
    build_event,
};
