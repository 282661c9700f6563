use std::sync::Arc;

use salvo::{
    Depot,
    http::StatusError,
    oapi::{ToSchema, endpoint},
    writing::Json,
};
use serde::Serialize;

use crate::{extensions::depot::DepotExt, state::State};

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthResponse {
    status: &'static str,
    database: String,
}

/// Reports liveness and which storage backend the server is running on.
#[endpoint(tags("health"), summary = "Service health")]
pub(crate) async fn healthcheck(depot: &Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(Json(HealthResponse {
        status: "ok",
        database: state.backend.as_str().to_owned(),
    }))
}
