//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{ApiTokenAuthService, AuthService},
    database::{self, DatabaseSettings, Store, StoreError},
    domain::{
        inscriptions::{InscriptionsService, StoreInscriptionsService},
        requests::{RequestsService, StoreRequestsService},
        students::{StoreStudentsService, StudentsService},
    },
    mailer::{LogMailer, Mailer},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to initialize storage")]
    Database(#[from] StoreError),
}

/// Admin credentials the API context is built with.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub api_token: String,
    pub admin_email: String,
}

impl AuthSettings {
    #[must_use]
    pub fn new(api_token: String, admin_email: String) -> Self {
        Self {
            api_token,
            admin_email,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub store: Store,
    pub inscriptions: Arc<dyn InscriptionsService>,
    pub students: Arc<dyn StudentsService>,
    pub requests: Arc<dyn RequestsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Select a backend, bring the schema up to date, seed the bootstrap
    /// admin, and wire the services.
    ///
    /// # Errors
    ///
    /// Returns an error when no backend is reachable or schema setup fails.
    pub async fn initialize(
        settings: &DatabaseSettings,
        auth: &AuthSettings,
    ) -> Result<Self, AppInitError> {
        let store = Store::connect(settings).await?;

        database::ensure_schema(&store).await?;
        database::seed_default_admin(&store).await?;

        let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);

        Ok(Self {
            inscriptions: Arc::new(StoreInscriptionsService::new(store.clone(), mailer)),
            students: Arc::new(StoreStudentsService::new(store.clone())),
            requests: Arc::new(StoreRequestsService::new(store.clone())),
            auth: Arc::new(ApiTokenAuthService::new(&auth.api_token, auth.admin_email.clone())),
            store,
        })
    }
}
