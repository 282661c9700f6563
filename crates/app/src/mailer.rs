//! Outbound notification boundary.
//!
//! Delivery is best-effort by contract: callers log failures and carry on,
//! a declined notification never fails the request that triggered it. The
//! production transport lives outside this crate; [`LogMailer`] records what
//! would have been sent.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::info;

use crate::domain::inscriptions::records::InscriptionStatus;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("failed to deliver notification: {0}")]
    Delivery(String),
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Confirm to an applicant that their submission was received.
    async fn send_submission_received(
        &self,
        email: &str,
        name: &str,
        inscription_id: i64,
    ) -> Result<(), MailerError>;

    /// Notify an applicant of an approval or rejection.
    async fn send_decision(
        &self,
        email: &str,
        name: &str,
        decision: InscriptionStatus,
        notes: &str,
    ) -> Result<(), MailerError>;
}

/// Logs each notification instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_submission_received(
        &self,
        email: &str,
        name: &str,
        inscription_id: i64,
    ) -> Result<(), MailerError> {
        info!(email, name, inscription_id, "submission confirmation");

        Ok(())
    }

    async fn send_decision(
        &self,
        email: &str,
        name: &str,
        decision: InscriptionStatus,
        notes: &str,
    ) -> Result<(), MailerError> {
        info!(email, name, decision = decision.as_str(), notes, "decision notification");

        Ok(())
    }
}
