use std::sync::Mutex;

use async_trait::async_trait;

use super::{EmailMessage, EmailSender};
use crate::domain::InfraError;

/// Keeps every sent message in memory
#[derive(Default)]
pub struct MemoryMailer {
    outbox: Mutex<Vec<EmailMessage>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }

    pub fn last_to(&self, to: &str) -> Option<EmailMessage> {
        self.sent().into_iter().rev().find(|m| m.to == to)
    }
}

#[async_trait]
impl EmailSender for MemoryMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), InfraError> {
        self.outbox
            .lock()
            .map_err(|_| InfraError::Mail("outbox lock poisoned".into()))?
            .push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str, subject: &str) -> EmailMessage {
        EmailMessage {
            from: "noreply@example.com".into(),
            to: to.into(),
            subject: subject.into(),
            body: "body".into(),
        }
    }

    #[tokio::test]
    async fn keeps_messages_in_order() {
        let mailer = MemoryMailer::new();
        mailer.send(message("a@example.com", "first")).await.unwrap();
        mailer.send(message("b@example.com", "second")).await.unwrap();
        mailer.send(message("a@example.com", "third")).await.unwrap();

        assert_eq!(mailer.sent().len(), 3);
        assert_eq!(mailer.last_to("a@example.com").unwrap().subject, "third");
        assert!(mailer.last_to("c@example.com").is_none());
    }
}
