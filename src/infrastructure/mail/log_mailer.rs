use async_trait::async_trait;
use tracing::info;

use super::{EmailMessage, EmailSender};
use crate::domain::InfraError;

/// Writes messages to the log instead of delivering them
pub struct LogMailer;

#[async_trait]
impl EmailSender for LogMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), InfraError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "Email delivery disabled, message logged"
        );
        Ok(())
    }
}
