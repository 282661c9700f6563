use std::sync::Arc;

use salvo::{
    Depot, Writer,
    http::StatusError,
    oapi::{ToSchema, endpoint, extract::{JsonBody, PathParam}},
    writing::Json,
};
use scolarite_app::domain::inscriptions::{
    data::InscriptionUpdate, records::InscriptionStatus,
};
use serde::Deserialize;

use crate::{
    extensions::depot::DepotExt,
    inscriptions::{errors, responses::InscriptionResponse},
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateInscriptionRequest {
    status: String,
    admin_notes: Option<String>,
}

/// Applies a review decision. The authenticated admin is recorded as the
/// processor; terminal decisions trigger an applicant notification.
#[endpoint(tags("admin"), summary = "Review an application")]
pub(crate) async fn update(
    id: PathParam<i64>,
    body: JsonBody<UpdateInscriptionRequest>,
    depot: &Depot,
) -> Result<Json<InscriptionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;

    let body = body.into_inner();

    let status = InscriptionStatus::parse(&body.status)
        .ok_or_else(|| StatusError::bad_request().brief("Invalid status value"))?;

    let changes = InscriptionUpdate {
        status,
        admin_notes: body.admin_notes,
    };

    let record = state
        .inscriptions
        .update_inscription(id.into_inner(), changes, &admin.email)
        .await
        .map_err(errors::into_status_error)?;

    Ok(Json(record.into()))
}
