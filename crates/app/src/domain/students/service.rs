//! Students service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Store,
    domain::students::{
        errors::StudentsServiceError, records::StudentRecord,
        repository::StoreStudentsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct StoreStudentsService {
    store: Store,
    repository: StoreStudentsRepository,
}

impl StoreStudentsService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store,
            repository: StoreStudentsRepository::new(),
        }
    }
}

#[async_trait]
impl StudentsService for StoreStudentsService {
    async fn search_by_matricule(
        &self,
        matricule: &str,
    ) -> Result<StudentRecord, StudentsServiceError> {
        let matricule = matricule.trim();

        if matricule.is_empty() {
            return Err(StudentsServiceError::MatriculeRequired);
        }

        let mut tx = self.store.begin().await?;

        let student = self
            .repository
            .find_by_matricule(&mut tx, matricule)
            .await?
            .ok_or(StudentsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(student)
    }
}

#[automock]
#[async_trait]
pub trait StudentsService: Send + Sync {
    /// Look a student up by their exact matricule. Surrounding whitespace is
    /// ignored; a blank matricule is a validation error.
    async fn search_by_matricule(
        &self,
        matricule: &str,
    ) -> Result<StudentRecord, StudentsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn search_finds_seeded_student() -> TestResult {
        let ctx = TestContext::new().await?;
        ctx.insert_student("20230042", "ACAD").await?;

        let service = ctx.students_service();
        let student = service.search_by_matricule(" 20230042 ").await?;

        assert_eq!(student.matricule, "20230042");
        assert_eq!(student.current_specialty, "ACAD");

        Ok(())
    }

    #[tokio::test]
    async fn search_blank_matricule_is_rejected() -> TestResult {
        let ctx = TestContext::new().await?;
        let service = ctx.students_service();

        let result = service.search_by_matricule("   ").await;

        assert!(matches!(result, Err(StudentsServiceError::MatriculeRequired)));

        Ok(())
    }

    #[tokio::test]
    async fn search_unknown_matricule_is_not_found() -> TestResult {
        let ctx = TestContext::new().await?;
        let service = ctx.students_service();

        let result = service.search_by_matricule("99999999").await;

        assert!(matches!(result, Err(StudentsServiceError::NotFound)));

        Ok(())
    }
}
