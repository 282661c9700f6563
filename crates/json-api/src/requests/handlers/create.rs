use std::sync::Arc;

use salvo::{
    Depot, Response, Writer,
    http::{StatusCode, StatusError},
    oapi::{ToSchema, endpoint, extract::JsonBody},
    writing::Json,
};
use scolarite_app::domain::requests::data::NewChangeRequest;
use serde::{Deserialize, Serialize};

use crate::{extensions::depot::DepotExt, requests::errors, state::State};

/// A submitted change request; empty fields surface as validation messages.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct CreateRequestBody {
    matricule: String,
    current_specialty: String,
    requested_specialty: String,
    motivation: String,
    priority: Option<String>,
}

impl From<CreateRequestBody> for NewChangeRequest {
    fn from(body: CreateRequestBody) -> Self {
        Self {
            matricule: body.matricule,
            current_specialty: body.current_specialty,
            requested_specialty: body.requested_specialty,
            motivation: body.motivation,
            priority: body.priority,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestCreatedResponse {
    request_id: i64,
}

/// Accepts a specialty change request; one pending request per student.
#[endpoint(tags("specialty-requests"), summary = "Submit a change request")]
pub(crate) async fn create(
    body: JsonBody<CreateRequestBody>,
    depot: &Depot,
    res: &mut Response,
) -> Result<Json<RequestCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request_id = state
        .requests
        .create_request(body.into_inner().into())
        .await
        .map_err(errors::into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(RequestCreatedResponse { request_id }))
}
