//! Inscriptions service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    database::{Store, now_utc},
    domain::inscriptions::{
        data::{InscriptionFilter, InscriptionStats, InscriptionUpdate, NewInscription, today},
        errors::InscriptionsServiceError,
        records::{InscriptionReceipt, InscriptionRecord, InscriptionSummary},
        repository::StoreInscriptionsRepository,
    },
    mailer::Mailer,
    pagination::{Page, PageInfo, PageRequest},
};

#[derive(Clone)]
pub struct StoreInscriptionsService {
    store: Store,
    repository: StoreInscriptionsRepository,
    mailer: Arc<dyn Mailer>,
}

impl std::fmt::Debug for StoreInscriptionsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreInscriptionsService")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl StoreInscriptionsService {
    #[must_use]
    pub fn new(store: Store, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            store,
            repository: StoreInscriptionsRepository::new(),
            mailer,
        }
    }
}

#[async_trait]
impl InscriptionsService for StoreInscriptionsService {
    async fn create_inscription(
        &self,
        data: NewInscription,
    ) -> Result<InscriptionReceipt, InscriptionsServiceError> {
        let data = data.normalized();
        let violations = data.validate(today());

        if !violations.is_empty() {
            return Err(InscriptionsServiceError::Validation(violations));
        }

        let mut tx = self.store.begin().await?;

        if self.repository.find_id_by_email(&mut tx, &data.email).await?.is_some() {
            return Err(InscriptionsServiceError::AlreadyExists);
        }

        let id = self.repository.create(&mut tx, &data, &now_utc()).await?;

        let created = self
            .repository
            .get(&mut tx, id)
            .await?
            .ok_or(InscriptionsServiceError::NotFound)?;

        tx.commit().await?;

        let name = format!("{} {}", created.first_name, created.last_name);

        if let Err(error) = self
            .mailer
            .send_submission_received(&created.email, &name, created.id)
            .await
        {
            warn!(inscription = created.id, "confirmation email failed: {error}");
        }

        Ok(InscriptionReceipt {
            id: created.id,
            email: created.email,
            status: created.status,
            submitted_at: created.created_at,
        })
    }

    async fn get_summary(
        &self,
        id: i64,
    ) -> Result<InscriptionSummary, InscriptionsServiceError> {
        let mut tx = self.store.begin().await?;

        let summary = self
            .repository
            .get_summary(&mut tx, id)
            .await?
            .ok_or(InscriptionsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(summary)
    }

    async fn get_inscription(
        &self,
        id: i64,
    ) -> Result<InscriptionRecord, InscriptionsServiceError> {
        let mut tx = self.store.begin().await?;

        let record = self
            .repository
            .get(&mut tx, id)
            .await?
            .ok_or(InscriptionsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_inscriptions(
        &self,
        filter: InscriptionFilter,
        page: PageRequest,
    ) -> Result<Page<InscriptionRecord>, InscriptionsServiceError> {
        let mut tx = self.store.begin().await?;

        let (items, total) = self.repository.list(&mut tx, &filter, page).await?;

        tx.commit().await?;

        Ok(Page {
            items,
            info: PageInfo::new(page, total),
        })
    }

    async fn update_inscription(
        &self,
        id: i64,
        update: InscriptionUpdate,
        processed_by: &str,
    ) -> Result<InscriptionRecord, InscriptionsServiceError> {
        let mut tx = self.store.begin().await?;

        let previous = self
            .repository
            .get(&mut tx, id)
            .await?
            .ok_or(InscriptionsServiceError::NotFound)?;

        self.repository
            .update_status(
                &mut tx,
                id,
                update.status,
                update.admin_notes.as_deref(),
                processed_by,
                &now_utc(),
            )
            .await?;

        let updated = self
            .repository
            .get(&mut tx, id)
            .await?
            .ok_or(InscriptionsServiceError::NotFound)?;

        tx.commit().await?;

        // Notify only on an effective transition into a decision.
        if update.status.is_terminal() && previous.status != update.status {
            let name = format!("{} {}", updated.first_name, updated.last_name);
            let notes = update.admin_notes.as_deref().unwrap_or("");

            if let Err(error) = self
                .mailer
                .send_decision(&updated.email, &name, update.status, notes)
                .await
            {
                warn!(inscription = id, "decision email failed: {error}");
            }
        }

        Ok(updated)
    }

    async fn delete_inscription(&self, id: i64) -> Result<(), InscriptionsServiceError> {
        let mut tx = self.store.begin().await?;

        let rows_affected = self.repository.delete(&mut tx, id).await?;

        if rows_affected == 0 {
            return Err(InscriptionsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn stats(&self) -> Result<InscriptionStats, InscriptionsServiceError> {
        let mut tx = self.store.begin().await?;

        let stats = self.repository.stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait InscriptionsService: Send + Sync {
    /// Validates and stores a new application, then sends the confirmation
    /// email best-effort.
    async fn create_inscription(
        &self,
        data: NewInscription,
    ) -> Result<InscriptionReceipt, InscriptionsServiceError>;

    /// Public confirmation-page projection.
    async fn get_summary(&self, id: i64)
    -> Result<InscriptionSummary, InscriptionsServiceError>;

    /// Full record for the admin detail view.
    async fn get_inscription(
        &self,
        id: i64,
    ) -> Result<InscriptionRecord, InscriptionsServiceError>;

    /// Filtered, sorted, paginated admin listing.
    async fn list_inscriptions(
        &self,
        filter: InscriptionFilter,
        page: PageRequest,
    ) -> Result<Page<InscriptionRecord>, InscriptionsServiceError>;

    /// Applies a review decision and notifies the applicant when the status
    /// effectively changes to a terminal one.
    async fn update_inscription(
        &self,
        id: i64,
        update: InscriptionUpdate,
        processed_by: &str,
    ) -> Result<InscriptionRecord, InscriptionsServiceError>;

    /// Removes an inscription.
    async fn delete_inscription(&self, id: i64) -> Result<(), InscriptionsServiceError>;

    /// Dashboard counters.
    async fn stats(&self) -> Result<InscriptionStats, InscriptionsServiceError>;
}
