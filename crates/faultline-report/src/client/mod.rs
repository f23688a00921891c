//! Delivery of events to a monitoring service

mod http;
mod reporter;
mod tracing_client;


pub use http::HttpClient;
pub use reporter::Reporter;
pub use tracing_client::TracingClient;

use crate::error::ReportResult;
use crate::event::Event;
use async_trait::async_trait;

/// A monitoring service accepting finished events
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportClient: Send + Sync {
    /// Deliver `event`, returning the identifier the service assigned
    async fn send(&self, event: &Event) -> ReportResult<Option<String>>;
}
