//! Outbound email
//!
//! The account flow only depends on [`EmailSender`]. Which implementation is
//! used is decided from configuration by [`create_mailer`].

mod log_mailer;
mod memory_mailer;
mod relay_mailer;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::EmailConfig;
use crate::domain::InfraError;

pub use log_mailer::LogMailer;
pub use memory_mailer::MemoryMailer;
pub use relay_mailer::RelayMailer;

/// A single outgoing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), InfraError>;
}

pub type SharedEmailSender = Arc<dyn EmailSender>;

/// Relay mailer when `relay_url` is configured, log-only mailer otherwise
pub fn create_mailer(config: &EmailConfig) -> SharedEmailSender {
    match &config.relay_url {
        Some(url) => Arc::new(RelayMailer::new(url.clone(), config.relay_token.clone())),
        None => Arc::new(LogMailer),
    }
}
