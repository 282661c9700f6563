use std::sync::Arc;

use salvo::{
    Depot, Response, Writer,
    http::{StatusCode, StatusError},
    oapi::{ToSchema, endpoint, extract::JsonBody},
    writing::Json,
};
use scolarite_app::domain::inscriptions::data::NewInscription;
use serde::{Deserialize, Serialize};

use crate::{extensions::depot::DepotExt, inscriptions::errors, state::State};

/// A submitted application form.
///
/// Every field defaults to empty so that an incomplete submission surfaces
/// the whole list of validation messages instead of a deserialization error.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct CreateInscriptionRequest {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    birth_date: String,
    address: String,
    city: String,
    postal_code: String,
    country: String,
    program: String,
    motivation: String,
}

impl From<CreateInscriptionRequest> for NewInscription {
    fn from(body: CreateInscriptionRequest) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            phone: body.phone,
            birth_date: body.birth_date,
            address: body.address,
            city: body.city,
            postal_code: body.postal_code,
            country: body.country,
            program: body.program,
            motivation: body.motivation,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InscriptionCreatedResponse {
    id: i64,
    email: String,
    status: String,
    submitted_at: String,
}

/// Accepts an application and returns its receipt.
#[endpoint(tags("inscriptions"), summary = "Submit an application")]
pub(crate) async fn create(
    body: JsonBody<CreateInscriptionRequest>,
    depot: &Depot,
    res: &mut Response,
) -> Result<Json<InscriptionCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let receipt = state
        .inscriptions
        .create_inscription(body.into_inner().into())
        .await
        .map_err(errors::into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(InscriptionCreatedResponse {
        id: receipt.id,
        email: receipt.email,
        status: receipt.status.as_str().to_owned(),
        submitted_at: receipt.submitted_at.to_string(),
    }))
}
