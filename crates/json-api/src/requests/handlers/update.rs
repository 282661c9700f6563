use std::sync::Arc;

use salvo::{
    Depot, Writer,
    http::{StatusCode, StatusError},
    oapi::{ToSchema, endpoint, extract::{JsonBody, PathParam}},
};
use scolarite_app::domain::requests::{data::RequestUpdate, records::RequestStatus};
use serde::Deserialize;

use crate::{extensions::depot::DepotExt, requests::errors, state::State};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateRequestBody {
    status: String,
    admin_notes: Option<String>,
    processed_by: Option<String>,
}

/// Applies a decision to a change request. Resolving a pending request
/// frees the student's pending slot.
#[endpoint(tags("specialty-requests"), summary = "Decide a change request")]
pub(crate) async fn update(
    id: PathParam<i64>,
    body: JsonBody<UpdateRequestBody>,
    depot: &Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let body = body.into_inner();

    let status = RequestStatus::parse(&body.status)
        .ok_or_else(|| StatusError::bad_request().brief("Statut invalide"))?;

    let changes = RequestUpdate {
        status,
        admin_notes: body.admin_notes,
        processed_by: body.processed_by,
    };

    state
        .requests
        .update_request(id.into_inner(), changes)
        .await
        .map_err(errors::into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::{http::StatusCode, test::TestClient};
    use scolarite_app::domain::requests::{
        MockRequestsService, RequestsServiceError, records::RequestStatus,
    };
    use serde_json::json;

    use crate::test_helpers;

    #[tokio::test]
    async fn decision_reaches_the_service() {
        let mut requests = MockRequestsService::new();
        requests
            .expect_update_request()
            .once()
            .withf(|id, changes| {
                *id == 42
                    && changes.status == RequestStatus::Approved
                    && changes.processed_by.as_deref() == Some("admin@example.com")
            })
            .return_once(|_, _| Ok(()));

        let service = test_helpers::service(test_helpers::state_with_requests(requests));

        let response = TestClient::patch("http://127.0.0.1/specialty-requests/42")
            .json(&json!({
                "status": "approved",
                "adminNotes": "dossier solide",
                "processedBy": "admin@example.com"
            }))
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::NO_CONTENT));
    }

    #[tokio::test]
    async fn unknown_status_is_a_400() {
        let service =
            test_helpers::service(test_helpers::state_with_requests(MockRequestsService::new()));

        let response = TestClient::patch("http://127.0.0.1/specialty-requests/42")
            .json(&json!({ "status": "under_review" }))
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn unknown_request_is_a_404() {
        let mut requests = MockRequestsService::new();
        requests
            .expect_update_request()
            .once()
            .return_once(|_, _| Err(RequestsServiceError::NotFound));

        let service = test_helpers::service(test_helpers::state_with_requests(requests));

        let response = TestClient::patch("http://127.0.0.1/specialty-requests/999")
            .json(&json!({ "status": "rejected" }))
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::NOT_FOUND));
    }
}
