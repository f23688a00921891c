//! Faultline
//!
//! Typed, classified, causally-chained errors with stack capture, plus
//! reporting of whole chains to a monitoring service.
//!
//! ```rust
//! use faultline::prelude::*;
//!
//! define_errors! {
//!     pub ORDER_NOT_FOUND = not_found("ORDER_NOT_FOUND", "order not found");
//! }
//!
//! let err = AppError::internal("SHOW_ORDER", "cannot show order")
//!     .with_cause(ORDER_NOT_FOUND.new().with_input(Input::new().with("order_id", 7)));
//!
//! let event = build_event(&err, &ReportConfig::default());
//! assert_eq!(event.exception.values[0].kind, "ORDER_NOT_FOUND");
//! assert_eq!(event.culprit, "order not found");
//! ```

pub use faultline_core::{
    AppError, AppResult, Cause, Classification, ErrorDefinition, ErrorRecord, Input,
    StackFrame, Stacktrace, define_errors,
};
pub use faultline_report::{Event, ReportConfig, Reporter, build_event};

/// Common imports
pub mod prelude {
    pub use faultline_core::error::{find_app_error, is};
    pub use faultline_core::{
        AppError, AppResult, Cause, Classification, ErrorDefinition, Input, define_errors,
    };
    pub use faultline_report::{
        Event, ReportClient, ReportConfig, ReportResult, Reporter, User, build_event,
    };
}
