//! Students repository.

use sqlx::{FromRow, Row, any::AnyRow};

use crate::{
    database::{StoreError, StoreTransaction, parse_timestamp},
    domain::students::records::StudentRecord,
};

const FIND_BY_MATRICULE_SQL: &str = include_str!("sql/find_student_by_matricule.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct StoreStudentsRepository;

impl StoreStudentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_by_matricule(
        &self,
        tx: &mut StoreTransaction,
        matricule: &str,
    ) -> Result<Option<StudentRecord>, StoreError> {
        let row = tx
            .query(FIND_BY_MATRICULE_SQL)
            .bind(matricule)
            .fetch_optional()
            .await?;

        row.as_ref().map(StudentRecord::from_row).transpose().map_err(Into::into)
    }
}

impl<'r> FromRow<'r, AnyRow> for StudentRecord {
    fn from_row(row: &'r AnyRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            matricule: row.try_get("matricule")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            current_specialty: row.try_get("current_specialty")?,
            palier: row.try_get("palier")?,
            section: row.try_get("section")?,
            etat: row.try_get("etat")?,
            groupe_td: row.try_get("groupe_td")?,
            groupe_tp: row.try_get("groupe_tp")?,
            created_at: parse_timestamp("created_at", &row.try_get::<String, _>("created_at")?)?,
            updated_at: parse_timestamp("updated_at", &row.try_get::<String, _>("updated_at")?)?,
        })
    }
}
