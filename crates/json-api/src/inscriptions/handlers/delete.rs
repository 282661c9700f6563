use std::sync::Arc;

use salvo::{
    Depot, Writer,
    http::{StatusCode, StatusError},
    oapi::{endpoint, extract::PathParam},
};

use crate::{extensions::depot::DepotExt, inscriptions::errors, state::State};

#[endpoint(tags("admin"), summary = "Delete an application")]
pub(crate) async fn delete(
    id: PathParam<i64>,
    depot: &Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .inscriptions
        .delete_inscription(id.into_inner())
        .await
        .map_err(errors::into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::{Router, http::StatusCode, test::TestClient};
    use scolarite_app::domain::inscriptions::{
        InscriptionsServiceError, MockInscriptionsService,
    };

    use super::delete;
    use crate::test_helpers;

    fn delete_service(inscriptions: MockInscriptionsService) -> salvo::Service {
        let router = Router::with_path("admin/inscriptions/{id}").delete(delete);

        test_helpers::admin_service(test_helpers::state_with_inscriptions(inscriptions), router)
    }

    #[tokio::test]
    async fn deletion_returns_no_content() {
        let mut inscriptions = MockInscriptionsService::new();
        inscriptions
            .expect_delete_inscription()
            .once()
            .withf(|id| *id == 7)
            .return_once(|_| Ok(()));

        let service = delete_service(inscriptions);

        let response = TestClient::delete("http://127.0.0.1/admin/inscriptions/7")
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::NO_CONTENT));
    }

    #[tokio::test]
    async fn unknown_inscription_is_a_404() {
        let mut inscriptions = MockInscriptionsService::new();
        inscriptions
            .expect_delete_inscription()
            .once()
            .return_once(|_| Err(InscriptionsServiceError::NotFound));

        let service = delete_service(inscriptions);

        let response = TestClient::delete("http://127.0.0.1/admin/inscriptions/999")
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::NOT_FOUND));
    }
}
