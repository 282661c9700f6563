use std::sync::Arc;

use salvo::{
    Depot, Writer,
    http::StatusError,
    oapi::{ToSchema, endpoint, extract::PathParam},
    writing::Json,
};
use serde::Serialize;

use crate::{extensions::depot::DepotExt, inscriptions::errors, state::State};

/// Confirmation-page projection, safe to show without authentication.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InscriptionSummaryResponse {
    id: i64,
    name: String,
    email: String,
    program: String,
    status: String,
    submitted_at: String,
}

#[endpoint(tags("inscriptions"), summary = "Application status lookup")]
pub(crate) async fn show(
    id: PathParam<i64>,
    depot: &Depot,
) -> Result<Json<InscriptionSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let summary = state
        .inscriptions
        .get_summary(id.into_inner())
        .await
        .map_err(errors::into_status_error)?;

    Ok(Json(InscriptionSummaryResponse {
        id: summary.id,
        name: format!("{} {}", summary.first_name, summary.last_name),
        email: summary.email,
        program: summary.program,
        status: summary.status.as_str().to_owned(),
        submitted_at: summary.created_at.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::{
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use scolarite_app::domain::inscriptions::{
        InscriptionsServiceError, MockInscriptionsService,
        records::{InscriptionStatus, InscriptionSummary},
    };
    use testresult::TestResult;

    use crate::test_helpers;

    #[tokio::test]
    async fn summary_includes_the_full_name() -> TestResult {
        let mut inscriptions = MockInscriptionsService::new();
        inscriptions
            .expect_get_summary()
            .once()
            .withf(|id| *id == 7)
            .return_once(|_| {
                Ok(InscriptionSummary {
                    id: 7,
                    first_name: "Amina".to_owned(),
                    last_name: "Benali".to_owned(),
                    email: "amina.benali@example.com".to_owned(),
                    program: "Computer Science".to_owned(),
                    status: InscriptionStatus::Pending,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let service = test_helpers::service(test_helpers::state_with_inscriptions(inscriptions));

        let mut response = TestClient::get("http://127.0.0.1/inscriptions/7")
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::OK));

        let body: serde_json::Value = response.take_json().await?;
        assert_eq!(body["name"], "Amina Benali");
        assert_eq!(body["status"], "pending");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_inscription_is_a_404() {
        let mut inscriptions = MockInscriptionsService::new();
        inscriptions
            .expect_get_summary()
            .once()
            .return_once(|_| Err(InscriptionsServiceError::NotFound));

        let service = test_helpers::service(test_helpers::state_with_inscriptions(inscriptions));

        let response = TestClient::get("http://127.0.0.1/inscriptions/999")
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::NOT_FOUND));
    }
}
