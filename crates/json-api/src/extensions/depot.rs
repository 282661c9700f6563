use salvo::{Depot, http::StatusError};
use scolarite_app::auth::AdminIdentity;
use tracing::error;

const ADMIN_IDENTITY_KEY: &str = "admin_identity";

pub(crate) trait DepotExt {
    /// Obtains an injected value, rendering a 500 when it is missing.
    fn obtain_or_500<T: Send + Sync + 'static>(&self) -> Result<&T, StatusError>;

    /// Records the admin identity the current request was authenticated as.
    fn insert_admin(&mut self, identity: AdminIdentity);

    /// The admin identity stamped by the auth middleware, or a 401 when the
    /// route was reached without one.
    fn admin_or_401(&self) -> Result<&AdminIdentity, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Send + Sync + 'static>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|_| {
            error!(
                "missing depot entry of type {}",
                std::any::type_name::<T>()
            );

            StatusError::internal_server_error()
        })
    }

    fn insert_admin(&mut self, identity: AdminIdentity) {
        self.insert(ADMIN_IDENTITY_KEY, identity);
    }

    fn admin_or_401(&self) -> Result<&AdminIdentity, StatusError> {
        self.get::<AdminIdentity>(ADMIN_IDENTITY_KEY)
            .map_err(|_| StatusError::unauthorized().brief("Authentication required"))
    }
}
