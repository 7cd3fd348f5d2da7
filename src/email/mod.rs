// src/email/mod.rs

pub mod templates;

use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

/// A fully rendered message ready for transport. This crate renders the
/// HTML body itself; the provider only carries it.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Opaque transport failure. The provider's reason is kept for logging but
/// callers only branch on success/failure.
#[derive(Debug)]
pub struct EmailError(pub String);

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "email dispatch failed: {}", self.0)
    }
}

impl std::error::Error for EmailError {}

/// Seam over the transactional email provider, so handlers and tests do not
/// depend on a live HTTP API.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError>;
}

/// Production sender: POSTs the rendered message to a Resend-compatible
/// HTTP API.
pub struct HttpEmailSender {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpEmailSender {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "from": &self.from,
                "to": [&email.to],
                "subject": &email.subject,
                "html": &email.html,
            }))
            .send()
            .await
            .map_err(|e| EmailError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError(format!("provider returned {}: {}", status, body)));
        }

        Ok(())
    }
}

/// In-memory sender used by the integration tests (and handy for local dev
/// without provider credentials): records every message and can be flipped
/// into a failure mode to simulate a provider outage.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
    pub fail: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn sent_to(&self, to: &str) -> Vec<OutboundEmail> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.to == to)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EmailSender for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(EmailError("simulated provider outage".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
