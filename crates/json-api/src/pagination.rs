use salvo::oapi::ToSchema;
use scolarite_app::pagination::PageInfo;
use serde::Serialize;

/// Paging metadata attached to every listing response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationMeta {
    current_page: i64,
    total_pages: i64,
    total_records: i64,
    limit: i64,
    has_next: bool,
    has_prev: bool,
}

impl From<PageInfo> for PaginationMeta {
    fn from(info: PageInfo) -> Self {
        Self {
            current_page: info.current_page,
            total_pages: info.total_pages,
            total_records: info.total_records,
            limit: info.limit,
            has_next: info.has_next,
            has_prev: info.has_prev,
        }
    }
}
