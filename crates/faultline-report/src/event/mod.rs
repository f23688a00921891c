//! Monitoring-service events built from error chains

mod builder;
mod types;


pub use builder::{build_event, input_annotation_key};
pub use types::{
    Event, EventFrame, EventStacktrace, Exception, ExceptionList, InputAnnotation, Level, User,
};
