//! State

use std::sync::Arc;

use scolarite_app::{
    auth::AuthService,
    context::AppContext,
    database::BackendKind,
    domain::{
        inscriptions::InscriptionsService, requests::RequestsService, students::StudentsService,
    },
};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) inscriptions: Arc<dyn InscriptionsService>,
    pub(crate) students: Arc<dyn StudentsService>,
    pub(crate) requests: Arc<dyn RequestsService>,
    pub(crate) auth: Arc<dyn AuthService>,
    pub(crate) backend: BackendKind,
}

impl State {
    #[must_use]
    pub(crate) fn new(
        inscriptions: Arc<dyn InscriptionsService>,
        students: Arc<dyn StudentsService>,
        requests: Arc<dyn RequestsService>,
        auth: Arc<dyn AuthService>,
        backend: BackendKind,
    ) -> Self {
        Self {
            inscriptions,
            students,
            requests,
            auth,
            backend,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        let backend = app.store.kind();

        Arc::new(Self::new(
            app.inscriptions,
            app.students,
            app.requests,
            app.auth,
            backend,
        ))
    }
}
