//! Shared fixtures for handler tests.

use std::sync::Arc;

use jiff::{Timestamp, civil::Date};
use salvo::{Depot, Router, Service, affix_state, handler};
use scolarite_app::{
    auth::{AdminIdentity, MockAuthService},
    database::BackendKind,
    domain::{
        inscriptions::{
            MockInscriptionsService,
            records::{InscriptionRecord, InscriptionStatus},
        },
        requests::{
            MockRequestsService,
            records::{RequestRecord, RequestStatus},
        },
        students::MockStudentsService,
    },
};

use crate::{extensions::depot::DepotExt, router, state::State};

pub(crate) const TEST_ADMIN_EMAIL: &str = "admin@example.com";

/// A state where every service panics when called.
pub(crate) fn state() -> Arc<State> {
    build_state(
        MockInscriptionsService::new(),
        MockStudentsService::new(),
        MockRequestsService::new(),
        MockAuthService::new(),
    )
}

pub(crate) fn state_with_inscriptions(inscriptions: MockInscriptionsService) -> Arc<State> {
    build_state(
        inscriptions,
        MockStudentsService::new(),
        MockRequestsService::new(),
        MockAuthService::new(),
    )
}

pub(crate) fn state_with_students(students: MockStudentsService) -> Arc<State> {
    build_state(
        MockInscriptionsService::new(),
        students,
        MockRequestsService::new(),
        MockAuthService::new(),
    )
}

pub(crate) fn state_with_requests(requests: MockRequestsService) -> Arc<State> {
    build_state(
        MockInscriptionsService::new(),
        MockStudentsService::new(),
        requests,
        MockAuthService::new(),
    )
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    build_state(
        MockInscriptionsService::new(),
        MockStudentsService::new(),
        MockRequestsService::new(),
        auth,
    )
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    MockAuthService::new()
}

fn build_state(
    inscriptions: MockInscriptionsService,
    students: MockStudentsService,
    requests: MockRequestsService,
    auth: MockAuthService,
) -> Arc<State> {
    Arc::new(State::new(
        Arc::new(inscriptions),
        Arc::new(students),
        Arc::new(requests),
        Arc::new(auth),
        BackendKind::Sqlite,
    ))
}

/// The full application router, with the given state injected.
pub(crate) fn service(state: Arc<State>) -> Service {
    service_with_router(state, router::app_router())
}

pub(crate) fn service_with_router(state: Arc<State>, router: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(affix_state::inject(state))
            .push(router),
    )
}

/// A representative stored application.
pub(crate) fn inscription_record(id: i64) -> InscriptionRecord {
    InscriptionRecord {
        id,
        first_name: "Amina".to_owned(),
        last_name: "Benali".to_owned(),
        email: "amina.benali@example.com".to_owned(),
        phone: "+213 555 123 456".to_owned(),
        birth_date: Date::constant(2000, 3, 14),
        address: "12 Rue des Oliviers".to_owned(),
        city: "Alger".to_owned(),
        postal_code: "16000".to_owned(),
        country: "Algeria".to_owned(),
        program: "Computer Science".to_owned(),
        motivation: "I have wanted to study computer science since secondary school \
                     and this program matches my goals."
            .to_owned(),
        status: InscriptionStatus::Pending,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        admin_notes: None,
        processed_by: None,
        processed_at: None,
    }
}

/// A representative stored specialty change request.
pub(crate) fn request_record(id: i64) -> RequestRecord {
    RequestRecord {
        id,
        student_matricule: "20230042".to_owned(),
        first_name: "Yasmine".to_owned(),
        last_name: "Cherif".to_owned(),
        current_specialty: "ACAD".to_owned(),
        requested_specialty: "GL".to_owned(),
        motivation: "Je souhaite m'orienter vers le génie logiciel.".to_owned(),
        status: RequestStatus::Pending,
        priority: "normal".to_owned(),
        created_at: Timestamp::UNIX_EPOCH,
        admin_notes: None,
        processed_by: None,
        processed_at: None,
    }
}

/// Stamps the test admin identity, standing in for the auth middleware.
#[handler]
pub(crate) async fn inject_admin(depot: &mut Depot) {
    depot.insert_admin(AdminIdentity::new(TEST_ADMIN_EMAIL));
}

/// A service for exercising admin handlers without going through token auth.
pub(crate) fn admin_service(state: Arc<State>, router: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(affix_state::inject(state))
            .hoop(inject_admin)
            .push(router),
    )
}
