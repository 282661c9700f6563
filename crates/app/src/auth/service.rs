//! Auth service.
//!
//! Token issuance lives outside this service; verification compares digests
//! of the presented bearer token against the configured admin API token, so
//! the plaintext token is never held after construction.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{errors::AuthServiceError, models::AdminIdentity},
    database::sha256_hex,
};

#[derive(Debug, Clone)]
pub struct ApiTokenAuthService {
    token_digest: String,
    admin_email: String,
}

impl ApiTokenAuthService {
    #[must_use]
    pub fn new(api_token: &str, admin_email: impl Into<String>) -> Self {
        Self {
            token_digest: sha256_hex(api_token),
            admin_email: admin_email.into(),
        }
    }
}

#[async_trait]
impl AuthService for ApiTokenAuthService {
    async fn verify_token(&self, token: &str) -> Result<AdminIdentity, AuthServiceError> {
        if sha256_hex(token) == self.token_digest {
            Ok(AdminIdentity::new(self.admin_email.clone()))
        } else {
            Err(AuthServiceError::InvalidToken)
        }
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the admin identity it belongs to.
    async fn verify_token(&self, token: &str) -> Result<AdminIdentity, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn valid_token_resolves_to_configured_identity() -> TestResult {
        let service = ApiTokenAuthService::new("sekrit", "admin@example.com");

        let identity = service.verify_token("sekrit").await?;

        assert_eq!(identity.email, "admin@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn wrong_token_is_rejected() {
        let service = ApiTokenAuthService::new("sekrit", "admin@example.com");

        let result = service.verify_token("guess").await;

        assert!(matches!(result, Err(AuthServiceError::InvalidToken)));
    }
}
