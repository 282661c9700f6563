//! Specialty-change requests service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;

use crate::{
    database::{Store, format_timestamp, now_utc},
    domain::requests::{
        data::{NewChangeRequest, RequestFilter, RequestStats, RequestUpdate},
        errors::RequestsServiceError,
        records::RequestRecord,
        repository::StoreRequestsRepository,
    },
    pagination::{Page, PageInfo, PageRequest},
};

const RECENT_WINDOW: SignedDuration = SignedDuration::from_hours(7 * 24);

#[derive(Debug, Clone)]
pub struct StoreRequestsService {
    store: Store,
    repository: StoreRequestsRepository,
}

impl StoreRequestsService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store,
            repository: StoreRequestsRepository::new(),
        }
    }
}

#[async_trait]
impl RequestsService for StoreRequestsService {
    async fn create_request(
        &self,
        data: NewChangeRequest,
    ) -> Result<i64, RequestsServiceError> {
        let data = data.normalized();
        let violations = data.validate();

        if !violations.is_empty() {
            return Err(RequestsServiceError::Validation(violations));
        }

        let mut tx = self.store.begin().await?;

        if !self.repository.student_exists(&mut tx, &data.matricule).await? {
            return Err(RequestsServiceError::StudentNotFound);
        }

        if self.repository.has_pending_request(&mut tx, &data.matricule).await? {
            return Err(RequestsServiceError::PendingRequestExists);
        }

        let id = self.repository.create(&mut tx, &data, &now_utc()).await?;

        tx.commit().await?;

        Ok(id)
    }

    async fn list_requests(
        &self,
        filter: RequestFilter,
        page: PageRequest,
    ) -> Result<Page<RequestRecord>, RequestsServiceError> {
        let mut tx = self.store.begin().await?;

        let (items, total) = self.repository.list(&mut tx, &filter, page).await?;

        tx.commit().await?;

        Ok(Page {
            items,
            info: PageInfo::new(page, total),
        })
    }

    async fn update_request(
        &self,
        id: i64,
        update: RequestUpdate,
    ) -> Result<(), RequestsServiceError> {
        let mut tx = self.store.begin().await?;

        let rows_affected = self
            .repository
            .update_status(
                &mut tx,
                id,
                update.status,
                update.admin_notes.as_deref(),
                update.processed_by.as_deref(),
                &now_utc(),
            )
            .await?;

        if rows_affected == 0 {
            return Err(RequestsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn stats(&self) -> Result<RequestStats, RequestsServiceError> {
        let cutoff = Timestamp::now()
            .checked_sub(RECENT_WINDOW)
            .unwrap_or(Timestamp::MIN);

        let mut tx = self.store.begin().await?;

        let stats = self.repository.stats(&mut tx, &format_timestamp(cutoff)).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait RequestsService: Send + Sync {
    /// Validates and stores a change request, enforcing one pending request
    /// per student; returns the generated request id.
    async fn create_request(&self, data: NewChangeRequest)
    -> Result<i64, RequestsServiceError>;

    /// Filtered, newest-first, paginated listing joined with student names.
    async fn list_requests(
        &self,
        filter: RequestFilter,
        page: PageRequest,
    ) -> Result<Page<RequestRecord>, RequestsServiceError>;

    /// Applies a decision with audit stamping; the caller identity comes from
    /// the request body and no notification is sent.
    async fn update_request(
        &self,
        id: i64,
        update: RequestUpdate,
    ) -> Result<(), RequestsServiceError>;

    /// Dashboard breakdowns for the change-request queue.
    async fn stats(&self) -> Result<RequestStats, RequestsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::requests::records::RequestStatus, test::TestContext};

    use super::*;

    fn valid_form() -> NewChangeRequest {
        NewChangeRequest {
            matricule: "20230042".to_owned(),
            current_specialty: "ACAD".to_owned(),
            requested_specialty: "GL".to_owned(),
            motivation: "Je souhaite rejoindre la spécialité génie logiciel car mon projet \
                         professionnel est le développement de systèmes critiques, et mes \
                         résultats dans les modules de programmation le confirment."
                .to_owned(),
            priority: None,
        }
    }

    #[tokio::test]
    async fn create_request_returns_generated_id() -> TestResult {
        let ctx = TestContext::new().await?;
        ctx.insert_student("20230042", "ACAD").await?;

        let service = ctx.requests_service();
        let id = service.create_request(valid_form()).await?;

        assert!(id > 0);

        Ok(())
    }

    #[tokio::test]
    async fn create_request_unknown_student_is_not_found() -> TestResult {
        let ctx = TestContext::new().await?;
        let service = ctx.requests_service();

        let result = service.create_request(valid_form()).await;

        assert!(matches!(result, Err(RequestsServiceError::StudentNotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn second_pending_request_conflicts() -> TestResult {
        let ctx = TestContext::new().await?;
        ctx.insert_student("20230042", "ACAD").await?;

        let service = ctx.requests_service();
        service.create_request(valid_form()).await?;

        let result = service.create_request(valid_form()).await;

        assert!(matches!(
            result,
            Err(RequestsServiceError::PendingRequestExists)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn resolving_a_request_releases_the_pending_slot() -> TestResult {
        let ctx = TestContext::new().await?;
        ctx.insert_student("20230042", "ACAD").await?;

        let service = ctx.requests_service();
        let id = service.create_request(valid_form()).await?;

        service
            .update_request(
                id,
                RequestUpdate {
                    status: RequestStatus::Rejected,
                    admin_notes: Some("dossier incomplet".to_owned()),
                    processed_by: Some("admin@example.com".to_owned()),
                },
            )
            .await?;

        let second = service.create_request(valid_form()).await?;
        assert!(second > id);

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_request_is_not_found() -> TestResult {
        let ctx = TestContext::new().await?;
        let service = ctx.requests_service();

        let result = service
            .update_request(
                999,
                RequestUpdate {
                    status: RequestStatus::Approved,
                    admin_notes: None,
                    processed_by: None,
                },
            )
            .await;

        assert!(matches!(result, Err(RequestsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn list_joins_student_names_and_filters() -> TestResult {
        let ctx = TestContext::new().await?;
        ctx.insert_student("20230042", "ACAD").await?;
        ctx.insert_student("20230043", "ACAD").await?;

        let service = ctx.requests_service();
        service.create_request(valid_form()).await?;

        let mut other = valid_form();
        other.matricule = "20230043".to_owned();
        other.requested_specialty = "SIQ".to_owned();
        service.create_request(other).await?;

        let all = service
            .list_requests(RequestFilter::default(), PageRequest::default())
            .await?;

        assert_eq!(all.items.len(), 2);
        assert!(!all.items[0].first_name.is_empty());

        let filtered = service
            .list_requests(
                RequestFilter {
                    requested_specialty: Some("SIQ".to_owned()),
                    ..RequestFilter::default()
                },
                PageRequest::default(),
            )
            .await?;

        assert_eq!(filtered.items.len(), 1);
        assert_eq!(filtered.items[0].student_matricule, "20230043");

        Ok(())
    }

    #[tokio::test]
    async fn validation_rejects_same_specialty() -> TestResult {
        let ctx = TestContext::new().await?;
        let service = ctx.requests_service();

        let mut form = valid_form();
        form.requested_specialty = "ACAD".to_owned();

        let result = service.create_request(form).await;

        assert!(matches!(result, Err(RequestsServiceError::Validation(_))));

        Ok(())
    }

    #[tokio::test]
    async fn stats_reports_breakdowns_and_recent_count() -> TestResult {
        let ctx = TestContext::new().await?;
        ctx.insert_student("20230042", "ACAD").await?;
        ctx.insert_student("20230043", "SIQ").await?;

        let service = ctx.requests_service();
        let id = service.create_request(valid_form()).await?;

        service
            .update_request(
                id,
                RequestUpdate {
                    status: RequestStatus::Approved,
                    admin_notes: None,
                    processed_by: Some("admin@example.com".to_owned()),
                },
            )
            .await?;

        let stats = service.stats().await?;

        assert_eq!(stats.requests_by_status.len(), 1);
        assert_eq!(stats.requests_by_status[0].status, "approved");
        assert_eq!(stats.students_by_current_specialty.len(), 2);
        assert_eq!(stats.recent_requests_count, 1);

        Ok(())
    }
}
