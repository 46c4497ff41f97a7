use async_trait::async_trait;
use tracing::debug;

use super::{EmailMessage, EmailSender};
use crate::domain::InfraError;

/// Posts messages as JSON to an HTTP mail relay
pub struct RelayMailer {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl RelayMailer {
    pub fn new(url: String, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            token,
        }
    }
}

#[async_trait]
impl EmailSender for RelayMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), InfraError> {
        debug!(to = %message.to, relay = %self.url, "Relaying email");

        let mut request = self.client.post(&self.url).json(&message);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| InfraError::Mail(e.to_string()))?;

        if !response.status().is_success() {
            return Err(InfraError::Mail(format!(
                "relay answered {}",
                response.status()
            )));
        }
        Ok(())
    }
}
