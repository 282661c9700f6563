use std::sync::Arc;

use salvo::{
    Depot, Request,
    http::StatusError,
    oapi::{ToSchema, endpoint},
    writing::Json,
};
use scolarite_app::{
    domain::inscriptions::{
        data::{InscriptionFilter, InscriptionSort, SortOrder},
        records::InscriptionStatus,
    },
    pagination::PageRequest,
};
use serde::Serialize;

use crate::{
    extensions::depot::DepotExt,
    inscriptions::{errors, responses::InscriptionResponse},
    pagination::PaginationMeta,
    state::State,
};

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct InscriptionListResponse {
    inscriptions: Vec<InscriptionResponse>,
    pagination: PaginationMeta,
}

/// Filtered, sorted, paginated admin listing.
///
/// Query parameters: `status` (or `all`), `search`, `sortBy`, `sortOrder`,
/// `page`, `limit`.
#[endpoint(tags("admin"), summary = "List applications")]
pub(crate) async fn index(
    req: &mut Request,
    depot: &Depot,
) -> Result<Json<InscriptionListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = parse_filter(req)?;
    let page = PageRequest::new(req.query("page"), req.query("limit"));

    let listing = state
        .inscriptions
        .list_inscriptions(filter, page)
        .await
        .map_err(errors::into_status_error)?;

    Ok(Json(InscriptionListResponse {
        inscriptions: listing.items.into_iter().map(Into::into).collect(),
        pagination: listing.info.into(),
    }))
}

fn parse_filter(req: &mut Request) -> Result<InscriptionFilter, StatusError> {
    let mut filter = InscriptionFilter::default();

    if let Some(status) = req.query::<String>("status")
        && status != "all"
    {
        filter.status = Some(
            InscriptionStatus::parse(&status)
                .ok_or_else(|| StatusError::bad_request().brief("Invalid status value"))?,
        );
    }

    filter.search = req
        .query::<String>("search")
        .map(|term| term.trim().to_owned())
        .filter(|term| !term.is_empty());

    if let Some(sort) = req.query::<String>("sortBy") {
        filter.sort_by = InscriptionSort::parse(&sort)
            .ok_or_else(|| StatusError::bad_request().brief("Invalid sort column"))?;
    }

    if let Some(order) = req.query::<String>("sortOrder") {
        filter.sort_order = SortOrder::parse(&order)
            .ok_or_else(|| StatusError::bad_request().brief("Invalid sort order"))?;
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router,
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use scolarite_app::{
        domain::inscriptions::{
            MockInscriptionsService,
            data::{InscriptionSort, SortOrder},
            records::InscriptionStatus,
        },
        pagination::{Page, PageInfo, PageRequest},
    };
    use testresult::TestResult;

    use super::index;
    use crate::test_helpers;

    fn listing_service(inscriptions: MockInscriptionsService) -> salvo::Service {
        let router = Router::with_path("admin/inscriptions").get(index);

        test_helpers::admin_service(test_helpers::state_with_inscriptions(inscriptions), router)
    }

    #[tokio::test]
    async fn filters_and_paging_reach_the_service() -> TestResult {
        let mut inscriptions = MockInscriptionsService::new();
        inscriptions
            .expect_list_inscriptions()
            .once()
            .withf(|filter, page| {
                filter.status == Some(InscriptionStatus::Approved)
                    && filter.search.as_deref() == Some("amina")
                    && filter.sort_by == InscriptionSort::LastName
                    && filter.sort_order == SortOrder::Asc
                    && page.page() == 2
                    && page.limit() == 5
            })
            .return_once(|_, page| {
                Ok(Page {
                    items: vec![test_helpers::inscription_record(7)],
                    info: PageInfo::new(page, 6),
                })
            });

        let service = listing_service(inscriptions);

        let mut response = TestClient::get(
            "http://127.0.0.1/admin/inscriptions?status=approved&search=amina&sortBy=last_name&sortOrder=asc&page=2&limit=5",
        )
        .send(&service)
        .await;

        assert_eq!(response.status_code, Some(StatusCode::OK));

        let body: serde_json::Value = response.take_json().await?;
        assert_eq!(body["inscriptions"][0]["id"], 7);
        assert_eq!(body["pagination"]["currentPage"], 2);
        assert_eq!(body["pagination"]["totalPages"], 2);
        assert_eq!(body["pagination"]["hasPrev"], true);

        Ok(())
    }

    #[tokio::test]
    async fn status_all_means_unfiltered() -> TestResult {
        let mut inscriptions = MockInscriptionsService::new();
        inscriptions
            .expect_list_inscriptions()
            .once()
            .withf(|filter, _| filter.status.is_none())
            .return_once(|_, _| {
                Ok(Page {
                    items: Vec::new(),
                    info: PageInfo::new(PageRequest::new(None, None), 0),
                })
            });

        let service = listing_service(inscriptions);

        let response = TestClient::get("http://127.0.0.1/admin/inscriptions?status=all")
            .send(&service)
            .await;

        assert_eq!(response.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_sort_column_is_a_400() {
        let service = listing_service(MockInscriptionsService::new());

        let response =
            TestClient::get("http://127.0.0.1/admin/inscriptions?sortBy=password_hash")
                .send(&service)
                .await;

        assert_eq!(response.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
