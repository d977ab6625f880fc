//! Outbound webhook delivery with exponential-backoff retry.
//!
//! A [`DashboardEvent`] is POSTed as JSON to an external URL. Delivery is
//! best-effort from the caller's perspective: the submission and timeline
//! layers fire it in the background and only log failures.

use std::time::Duration;

use crate::bus::DashboardEvent;

/// Backoff before each retry (1 s, 2 s, 4 s).
const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

/// Delivers dashboard events to an external webhook endpoint.
pub struct WebhookDelivery {
    client: reqwest::Client,
    url: String,
}

impl WebhookDelivery {
    /// Create a delivery service for one endpoint URL.
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            url: url.into(),
        }
    }

    /// Deliver an event, retrying up to three times with backoff.
    /// Returns `Ok(())` on the first successful attempt.
    pub async fn deliver(&self, event: &DashboardEvent) -> Result<(), WebhookError> {
        let body = serde_json::json!({
            "event": event.event_type,
            "project_id": event.project_id,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });

        let mut last_err = match self.try_send(&body).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        for (attempt, delay_secs) in RETRY_DELAYS_SECS.iter().enumerate() {
            tracing::warn!(
                attempt = attempt + 1,
                url = %self.url,
                error = %last_err,
                "Webhook delivery attempt failed, retrying"
            );
            tokio::time::sleep(Duration::from_secs(*delay_secs)).await;
            match self.try_send(&body).await {
                Ok(()) => return Ok(()),
                Err(e) => last_err = e,
            }
        }

        tracing::error!(url = %self.url, error = %last_err, "Webhook delivery failed after all retries");
        Err(last_err)
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, body: &serde_json::Value) -> Result<(), WebhookError> {
        let response = self.client.post(&self.url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}
