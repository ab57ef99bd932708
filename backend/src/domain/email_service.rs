use anyhow::Context;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use crate::config::EmailConfig;
use crate::error::ApiError;

const INVITATION_SUBJECT: &str = "Invitación para unirse al condominio";

/// Sends the invitation notification. While no sender address is
/// configured, delivery is skipped with a log line so local setups work
/// without an SMTP account.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
    transport: Option<SmtpTransport>,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> anyhow::Result<Self> {
        if config.from_email.is_empty() {
            return Ok(Self { config, transport: None });
        }

        info!(
            "Initializing email service for SMTP server: {}:{}",
            config.smtp_server, config.smtp_port
        );

        let tls_params = TlsParameters::new(config.smtp_server.clone())
            .context("Failed to create TLS parameters")?;

        let transport = SmtpTransport::relay(&config.smtp_server)
            .context("Failed to create SMTP relay")?
            .port(config.smtp_port)
            .tls(Tls::Required(tls_params))
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            config,
            transport: Some(transport),
        })
    }

    /// Mailer with delivery disabled.
    pub fn disabled() -> Self {
        Self {
            config: EmailConfig::default(),
            transport: None,
        }
    }

    /// Send the invitation carrying the one-time credentials. Username and
    /// password travel in plaintext: they are communicated exactly once,
    /// out of band, and the recipient is expected to change the password.
    pub fn send_invitation(
        &self,
        to: &str,
        username: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let recipient = to
            .parse::<Mailbox>()
            .map_err(|_| ApiError::Validation(format!("'{to}' is not a valid email address.")))?;

        let Some(transport) = &self.transport else {
            info!("No SMTP transport configured, skipping invitation email to {}", to);
            return Ok(());
        };

        let body = format!(
            "Hello!\n\nYou have been invited to join your condominium's management portal.\n\n\
             Username: {username}\nPassword: {password}\n\n\
             Please log in and change your password.",
        );

        let sender = self
            .config
            .from_email
            .parse::<Mailbox>()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to parse sender address: {e}")))?;

        let email = Message::builder()
            .from(sender)
            .to(recipient)
            .subject(INVITATION_SUBJECT)
            .body(body)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to build email: {e}")))?;

        transport
            .send(&email)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to send invitation email: {e}")))?;

        info!("Invitation email sent to {}", to);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_mailer_skips_delivery() {
        let service = EmailService::disabled();
        service
            .send_invitation("jdoe@example.com", "jdoe", "hunter2hunter2")
            .expect("Disabled mailer should not fail");
    }

    #[test]
    fn test_invalid_recipient_is_rejected_even_when_disabled() {
        let service = EmailService::disabled();
        let result = service.send_invitation("not-an-address", "jdoe", "hunter2hunter2");
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
