use std::sync::Arc;

use salvo::{
    Depot, Writer,
    http::StatusError,
    oapi::{endpoint, extract::PathParam},
    writing::Json,
};

use crate::{
    extensions::depot::DepotExt,
    inscriptions::{errors, responses::InscriptionResponse},
    state::State,
};

#[endpoint(tags("admin"), summary = "Application detail")]
pub(crate) async fn get(
    id: PathParam<i64>,
    depot: &Depot,
) -> Result<Json<InscriptionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let record = state
        .inscriptions
        .get_inscription(id.into_inner())
        .await
        .map_err(errors::into_status_error)?;

    Ok(Json(record.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router,
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use scolarite_app::domain::inscriptions::{
        InscriptionsServiceError, MockInscriptionsService,
    };
    use testresult::TestResult;

    use super::get;
    use crate::test_helpers;

    fn detail_service(inscriptions: MockInscriptionsService) -> salvo::Service {
        let router = Router::with_path("admin/inscriptions/{id}").get(get);

        test_helpers::admin_service(test_helpers::state_with_inscriptions(inscriptions), router)
    }

    #[tokio::test]
    async fn detail_returns_the_full_record() -> TestResult {
        let mut inscriptions = MockInscriptionsService::new();
        inscriptions
            .expect_get_inscription()
            .once()
            .withf(|id| *id == 7)
            .return_once(|_| Ok(test_helpers::inscription_record(7)));

        let service = detail_service(inscriptions);

        let mut response = TestClient::get("http://127.0.0.1/admin/inscriptions/7")
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::OK));

        let body: serde_json::Value = response.take_json().await?;
        assert_eq!(body["id"], 7);
        assert_eq!(body["birth_date"], "2000-03-14");
        assert_eq!(body["motivation"].as_str().map(str::is_empty), Some(false));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_id_is_a_404() {
        let mut inscriptions = MockInscriptionsService::new();
        inscriptions
            .expect_get_inscription()
            .once()
            .return_once(|_| Err(InscriptionsServiceError::NotFound));

        let service = detail_service(inscriptions);

        let response = TestClient::get("http://127.0.0.1/admin/inscriptions/999")
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::NOT_FOUND));
    }
}
