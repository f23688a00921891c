//! Client posting events to a Sentry-compatible store endpoint

use super::ReportClient;
use crate::dsn::Dsn;
use crate::error::{ReportError, ReportResult};
use crate::event::Event;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct StoreAck {
    id: Option<String>,
}

/// HTTP transport for events
#[derive(Debug, Clone)]
pub struct HttpClient {
    dsn: Dsn,
    store_url: String,
    http_client: Client,
}

impl HttpClient {
    /// Create a client with a default `reqwest` client
    pub fn new(dsn: Dsn) -> ReportResult<Self> {
        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("faultline/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http_client(dsn, http_client))
    }

    /// Create a client sharing an existing `reqwest` client
    pub fn with_http_client(dsn: Dsn, http_client: Client) -> Self {
        Self {
            store_url: dsn.store_url(),
            dsn,
            http_client,
        }
    }

    pub fn store_url(&self) -> &str {
        &self.store_url
    }
}

#[async_trait]
impl ReportClient for HttpClient {
    #[instrument(skip(self, event), fields(event_id = %event.event_id), level = "debug")]
    async fn send(&self, event: &Event) -> ReportResult<Option<String>> {
        let response = self
            .http_client
            .post(&self.store_url)
            .header("X-Sentry-Auth", self.dsn.auth_header(event.timestamp.timestamp()))
            .header("Content-Type", "application/json")
            .json(event)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Monitoring service rejected event");
            return Err(ReportError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let id = serde_json::from_str::<StoreAck>(&body)
            .ok()
            .and_then(|ack| ack.id)
            .unwrap_or_else(|| event.event_id.clone());
        tracing::debug!(id = %id, "Event accepted");
        Ok(Some(id))
    }
}
