//! Client that writes events to the log

use super::ReportClient;
use crate::error::ReportResult;
use crate::event::Event;
use async_trait::async_trait;

/// Emits each event as a `tracing` error record.
///
/// Used when no DSN is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingClient;

impl TracingClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReportClient for TracingClient {
    async fn send(&self, event: &Event) -> ReportResult<Option<String>> {
        let exceptions: Vec<&str> = event
            .exception
            .values
            .iter()
            .map(|e| e.value.as_str())
            .collect();
        tracing::error!(
            event_id = %event.event_id,
            level = ?event.level,
            logger = %event.logger,
            culprit = %event.culprit,
            fingerprint = ?event.fingerprint,
            exceptions = ?exceptions,
            "{}",
            event.message
        );
        Ok(Some(event.event_id.clone()))
    }
}
