use std::sync::Arc;

use salvo::{
    Depot,
    http::StatusError,
    oapi::{ToSchema, endpoint},
    writing::Json,
};
use scolarite_app::domain::inscriptions::data::InscriptionStats;
use serde::Serialize;

use crate::{extensions::depot::DepotExt, inscriptions::errors, state::State};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InscriptionStatsResponse {
    total_pending: i64,
    total_approved: i64,
    total_rejected: i64,
    total_under_review: i64,
    program_distribution: Vec<ProgramCountResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ProgramCountResponse {
    program: String,
    count: i64,
}

impl From<InscriptionStats> for InscriptionStatsResponse {
    fn from(counters: InscriptionStats) -> Self {
        Self {
            total_pending: counters.total_pending,
            total_approved: counters.total_approved,
            total_rejected: counters.total_rejected,
            total_under_review: counters.total_under_review,
            program_distribution: counters
                .program_distribution
                .into_iter()
                .map(|slice| ProgramCountResponse {
                    program: slice.program,
                    count: slice.count,
                })
                .collect(),
        }
    }
}

#[endpoint(tags("admin"), summary = "Application dashboard counters")]
pub(crate) async fn stats(depot: &Depot) -> Result<Json<InscriptionStatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let counters = state
        .inscriptions
        .stats()
        .await
        .map_err(errors::into_status_error)?;

    Ok(Json(counters.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router,
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use scolarite_app::domain::inscriptions::{
        MockInscriptionsService,
        data::{InscriptionStats, ProgramCount},
    };
    use testresult::TestResult;

    use super::stats;
    use crate::test_helpers;

    #[tokio::test]
    async fn counters_are_rendered_camel_case() -> TestResult {
        let mut inscriptions = MockInscriptionsService::new();
        inscriptions.expect_stats().once().return_once(|| {
            Ok(InscriptionStats {
                total_pending: 4,
                total_approved: 2,
                total_rejected: 1,
                total_under_review: 0,
                program_distribution: vec![ProgramCount {
                    program: "Computer Science".to_owned(),
                    count: 5,
                }],
            })
        });

        let router = Router::with_path("admin/stats").get(stats);
        let service = test_helpers::admin_service(
            test_helpers::state_with_inscriptions(inscriptions),
            router,
        );

        let mut response = TestClient::get("http://127.0.0.1/admin/stats")
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::OK));

        let body: serde_json::Value = response.take_json().await?;
        assert_eq!(body["totalPending"], 4);
        assert_eq!(body["programDistribution"][0]["program"], "Computer Science");

        Ok(())
    }
}
