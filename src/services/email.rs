// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! Outbound email for address verification.
//!
//! Uses SMTP via lettre (STARTTLS relay). The service is optional: when no
//! SMTP configuration is present the application runs without a mailer and
//! skips sending.

use lettre::{
    message::header::ContentType,
    transport::smtp::{authentication::Credentials, Error as SmtpError},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::config::SmtpConfig;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid sender or recipient address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),
}

/// Email service for verification mail.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    /// Returns an error when the relay host cannot be resolved.
    pub fn new(config: &SmtpConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from.clone(),
        })
    }

    /// Send the verification email containing the given link.
    pub async fn send_verification(&self, to: &str, link: &str) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(self.from_address.parse()?)
            .to(to.parse()?)
            .subject("Verify your email")
            .header(ContentType::TEXT_HTML)
            .body(verification_body(link))?;

        self.mailer.send(message).await?;
        tracing::info!(recipient = to, "verification email sent");
        Ok(())
    }
}

/// HTML body for the verification email.
fn verification_body(link: &str) -> String {
    format!(
        "<p>Welcome to Rolodex!</p>\
         <p>Please confirm your email address by visiting \
         <a href=\"{link}\">{link}</a>.</p>\
         <p>If you did not sign up, you can ignore this message.</p>"
    )
}
