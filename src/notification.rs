//! Outbound notification contract and the default logging transport.

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("email transport unavailable: {0}")]
    Unavailable(String),
    #[error("email rejected: {0}")]
    Rejected(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, email: Email) -> Result<(), NotificationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub from_address: String,
    pub from_name: String,
    /// Recipient of leave-request submission notices.
    pub leave_request_recipient: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            from_address: "noreply@org.com".to_string(),
            from_name: "HR Leave Management".to_string(),
            leave_request_recipient: "employee@org.com".to_string(),
        }
    }
}

/// Writes every message to the log instead of delivering it.
#[derive(Debug, Clone)]
pub struct LogEmailSender {
    settings: EmailSettings,
}

impl LogEmailSender {
    pub fn new(settings: EmailSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_email(&self, email: Email) -> Result<(), NotificationError> {
        if email.to.trim().is_empty() {
            return Err(NotificationError::Rejected("empty recipient".to_string()));
        }
        tracing::info!(
            from = %format!("{} <{}>", self.settings.from_name, self.settings.from_address),
            to = %email.to,
            subject = %email.subject,
            "Email sent"
        );
        tracing::debug!(body = %email.body, "Email body");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> Email {
        Email {
            to: to.to_string(),
            subject: "Leave Request Submitted".to_string(),
            body: "body".to_string(),
        }
    }

    #[tokio::test]
    async fn log_sender_accepts_addressed_mail() {
        let sender = LogEmailSender::new(EmailSettings::default());
        assert!(sender.send_email(email("employee@org.com")).await.is_ok());
    }

    #[tokio::test]
    async fn log_sender_rejects_blank_recipient() {
        let sender = LogEmailSender::new(EmailSettings::default());
        let result = sender.send_email(email(" ")).await;
        assert!(matches!(result, Err(NotificationError::Rejected(_))));
    }
}
