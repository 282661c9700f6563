//! Bearer-token middleware guarding the admin routes.

use std::sync::Arc;

use salvo::{
    Depot, FlowCtrl, Request, Response,
    http::{StatusError, header::AUTHORIZATION},
};
use tracing::debug;

use crate::{extensions::depot::DepotExt, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing bearer token"));
        ctrl.skip_rest();

        return;
    };

    match state.auth.verify_token(&token).await {
        Ok(identity) => depot.insert_admin(identity),
        Err(error) => {
            debug!("rejected admin token: {error}");

            res.render(StatusError::unauthorized().brief("Invalid API token"));
            ctrl.skip_rest();
        }
    }
}

fn extract_bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router,
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use scolarite_app::auth::{AdminIdentity, MockAuthService};
    use testresult::TestResult;

    use super::*;
    use crate::test_helpers;

    #[salvo::handler]
    async fn probe(depot: &Depot) -> Result<String, StatusError> {
        let identity = depot.admin_or_401()?;

        Ok(identity.email.clone())
    }

    fn guarded_service(auth: MockAuthService) -> salvo::Service {
        let router = Router::with_path("admin")
            .hoop(handler)
            .push(Router::with_path("probe").get(probe));

        test_helpers::service_with_router(test_helpers::state_with_auth(auth), router)
    }

    #[tokio::test]
    async fn missing_authorization_header_is_unauthorized() {
        let service = guarded_service(test_helpers::strict_auth_mock());

        let response = TestClient::get("http://127.0.0.1/admin/probe")
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn malformed_authorization_header_is_unauthorized() {
        let service = guarded_service(test_helpers::strict_auth_mock());

        let response = TestClient::get("http://127.0.0.1/admin/probe")
            .add_header(AUTHORIZATION, "Basic dXNlcjpwYXNz", true)
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn invalid_token_is_unauthorized() {
        let mut auth = test_helpers::strict_auth_mock();
        auth.expect_verify_token()
            .once()
            .withf(|token| token == "wrong")
            .return_once(|_| Err(scolarite_app::auth::AuthServiceError::InvalidToken));

        let service = guarded_service(auth);

        let response = TestClient::get("http://127.0.0.1/admin/probe")
            .add_header(AUTHORIZATION, "Bearer wrong", true)
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn valid_token_stamps_the_admin_identity() -> TestResult {
        let mut auth = test_helpers::strict_auth_mock();
        auth.expect_verify_token()
            .once()
            .withf(|token| token == "sekrit")
            .return_once(|_| Ok(AdminIdentity::new("admin@example.com")));

        let service = guarded_service(auth);

        let mut response = TestClient::get("http://127.0.0.1/admin/probe")
            .add_header(AUTHORIZATION, "Bearer sekrit", true)
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::OK));
        assert_eq!(response.take_string().await?, "admin@example.com");

        Ok(())
    }
}
