use std::sync::Arc;

use salvo::{
    Depot,
    http::StatusError,
    oapi::{ToSchema, endpoint},
    writing::Json,
};
use scolarite_app::domain::requests::data::RequestStats;
use serde::Serialize;

use crate::{extensions::depot::DepotExt, requests::errors, state::State};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestStatsResponse {
    requests_by_status: Vec<StatusCountResponse>,
    requests_by_specialty: Vec<RequestedSpecialtyCountResponse>,
    students_by_current_specialty: Vec<CurrentSpecialtyCountResponse>,
    recent_requests_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct StatusCountResponse {
    status: String,
    count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestedSpecialtyCountResponse {
    requested_specialty: String,
    count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CurrentSpecialtyCountResponse {
    current_specialty: String,
    count: i64,
}

impl From<RequestStats> for RequestStatsResponse {
    fn from(counters: RequestStats) -> Self {
        Self {
            requests_by_status: counters
                .requests_by_status
                .into_iter()
                .map(|slice| StatusCountResponse {
                    status: slice.status,
                    count: slice.count,
                })
                .collect(),
            requests_by_specialty: counters
                .requests_by_specialty
                .into_iter()
                .map(|slice| RequestedSpecialtyCountResponse {
                    requested_specialty: slice.requested_specialty,
                    count: slice.count,
                })
                .collect(),
            students_by_current_specialty: counters
                .students_by_current_specialty
                .into_iter()
                .map(|slice| CurrentSpecialtyCountResponse {
                    current_specialty: slice.current_specialty,
                    count: slice.count,
                })
                .collect(),
            recent_requests_count: counters.recent_requests_count,
        }
    }
}

/// Aggregates over the request log, including a seven-day activity count.
#[endpoint(tags("specialty-requests"), summary = "Change-request statistics")]
pub(crate) async fn stats(depot: &Depot) -> Result<Json<RequestStatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let counters = state
        .requests
        .stats()
        .await
        .map_err(errors::into_status_error)?;

    Ok(Json(counters.into()))
}
