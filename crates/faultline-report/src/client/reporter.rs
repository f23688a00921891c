//! Event dispatch

use super::{HttpClient, ReportClient, TracingClient};
use crate::config::{self, ReportConfig};
use crate::error::{ReportError, ReportResult};
use crate::event::{Event, build_event};
use faultline_core::AppError;
use std::sync::Arc;

/// Builds events from errors and hands them to a [`ReportClient`]
#[derive(Clone)]
pub struct Reporter {
    client: Arc<dyn ReportClient>,
    config: Arc<ReportConfig>,
}

impl Reporter {
    pub fn new(client: Arc<dyn ReportClient>, config: ReportConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    /// Reporter posting to the configured DSN, or logging when there is none
    pub fn from_config(config: ReportConfig) -> ReportResult<Self> {
        let client: Arc<dyn ReportClient> = match &config.dsn {
            Some(dsn) => Arc::new(HttpClient::new(dsn.clone())?),
            None => {
                tracing::debug!("No DSN configured, reporting to the log");
                Arc::new(TracingClient::new())
            }
        };
        Ok(Self::new(client, config))
    }

    /// Reporter for the globally installed configuration
    pub fn from_global() -> ReportResult<Self> {
        let config = config::global().cloned().ok_or(ReportError::NotConfigured)?;
        Self::from_config(config)
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Build the event for `err` without sending it
    pub fn event(&self, err: &AppError) -> Event {
        build_event(err, &self.config)
    }

    /// Report `err` without waiting for delivery.
    ///
    /// Returns the event id at once. Outside a tokio runtime the event is
    /// dropped with a warning.
    pub fn capture(&self, err: &AppError) -> String {
        self.capture_event(self.event(err))
    }

    /// Send an already built event without waiting for delivery
    pub fn capture_event(&self, event: Event) -> String {
        let event_id = event.event_id.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let client = Arc::clone(&self.client);
                handle.spawn(async move {
                    if let Err(e) = client.send(&event).await {
                        tracing::warn!(
                            event_id = %event.event_id,
                            error = %e,
                            "Failed to deliver event"
                        );
                    }
                });
            }
            Err(_) => {
                tracing::warn!(event_id = %event_id, "No async runtime, event dropped");
            }
        }
        event_id
    }

    /// Report `err` and wait until the service acknowledges it
    pub async fn capture_and_wait(&self, err: &AppError) -> ReportResult<Option<String>> {
        self.send_event(&self.event(err)).await
    }

    /// Send an already built event and wait for the acknowledgement
    pub async fn send_event(&self, event: &Event) -> ReportResult<Option<String>> {
        let result = self.client.send(event).await;
        if let Err(e) = &result {
            tracing::warn!(event_id = %event.event_id, error = %e, "Failed to deliver event");
        }
        result
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
