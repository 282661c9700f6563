use std::sync::Arc;

use salvo::{
    Depot, Request,
    http::StatusError,
    oapi::{ToSchema, endpoint},
    writing::Json,
};
use scolarite_app::{
    domain::requests::{data::RequestFilter, records::RequestStatus},
    pagination::PageRequest,
};
use serde::Serialize;

use crate::{
    extensions::depot::DepotExt,
    pagination::PaginationMeta,
    requests::{errors, responses::RequestResponse},
    state::State,
};

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RequestListResponse {
    requests: Vec<RequestResponse>,
    pagination: PaginationMeta,
}

/// Newest-first listing of change requests.
///
/// Query parameters: `status`, `specialty` (requested specialty), `page`,
/// `limit`.
#[endpoint(tags("specialty-requests"), summary = "List change requests")]
pub(crate) async fn index(
    req: &mut Request,
    depot: &Depot,
) -> Result<Json<RequestListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let mut filter = RequestFilter::default();

    if let Some(status) = req.query::<String>("status") {
        filter.status = Some(
            RequestStatus::parse(&status)
                .ok_or_else(|| StatusError::bad_request().brief("Statut invalide"))?,
        );
    }

    filter.requested_specialty = req
        .query::<String>("specialty")
        .map(|term| term.trim().to_owned())
        .filter(|term| !term.is_empty());

    let page = PageRequest::new(req.query("page"), req.query("limit"));

    let listing = state
        .requests
        .list_requests(filter, page)
        .await
        .map_err(errors::into_status_error)?;

    Ok(Json(RequestListResponse {
        requests: listing.items.into_iter().map(Into::into).collect(),
        pagination: listing.info.into(),
    }))
}
