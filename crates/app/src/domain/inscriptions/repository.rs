//! Inscriptions repository.

use sqlx::{FromRow, Row, any::AnyRow};

use crate::{
    database::{BackendKind, StoreError, StoreTransaction, parse_timestamp},
    domain::inscriptions::{
        data::{InscriptionFilter, InscriptionStats, NewInscription, ProgramCount},
        records::{InscriptionRecord, InscriptionStatus, InscriptionSummary},
    },
    pagination::PageRequest,
};

const FIND_ID_BY_EMAIL_SQL: &str = include_str!("sql/find_inscription_id_by_email.sql");
const CREATE_INSCRIPTION_SQL: &str = include_str!("sql/create_inscription.sql");
const GET_INSCRIPTION_SQL: &str = include_str!("sql/get_inscription.sql");
const GET_SUMMARY_SQL: &str = include_str!("sql/get_inscription_summary.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_inscription_status.sql");
const DELETE_INSCRIPTION_SQL: &str = include_str!("sql/delete_inscription.sql");
const COUNT_BY_STATUS_SQL: &str = include_str!("sql/count_inscriptions_by_status.sql");
const PROGRAM_DISTRIBUTION_SQL: &str = include_str!("sql/program_distribution.sql");

const LIST_COLUMNS: &str = "id, first_name, last_name, email, phone, birth_date, \
                            address, city, postal_code, country, program, motivation, \
                            status, created_at, updated_at, admin_notes, processed_by, \
                            processed_at";

#[derive(Debug, Clone, Default)]
pub(crate) struct StoreInscriptionsRepository;

impl StoreInscriptionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_id_by_email(
        &self,
        tx: &mut StoreTransaction,
        email: &str,
    ) -> Result<Option<i64>, StoreError> {
        let row = tx.query(FIND_ID_BY_EMAIL_SQL).bind(email).fetch_optional().await?;

        row.map(|row| row.try_get("id")).transpose().map_err(Into::into)
    }

    pub(crate) async fn create(
        &self,
        tx: &mut StoreTransaction,
        data: &NewInscription,
        now: &str,
    ) -> Result<i64, StoreError> {
        // PostgreSQL reports generated keys through RETURNING; SQLite reports
        // them on the statement result.
        match tx.kind() {
            BackendKind::Postgres => {
                let sql = format!("{} RETURNING id", CREATE_INSCRIPTION_SQL.trim_end());
                let row = bind_new_inscription(tx.query(&sql), data, now).fetch_one().await?;

                row.try_get("id").map_err(Into::into)
            }
            BackendKind::Sqlite => {
                let result = bind_new_inscription(tx.query(CREATE_INSCRIPTION_SQL), data, now)
                    .execute()
                    .await?;

                result.last_insert_id.ok_or(StoreError::NoInsertId)
            }
        }
    }

    pub(crate) async fn get(
        &self,
        tx: &mut StoreTransaction,
        id: i64,
    ) -> Result<Option<InscriptionRecord>, StoreError> {
        let row = tx.query(GET_INSCRIPTION_SQL).bind(id).fetch_optional().await?;

        row.as_ref().map(InscriptionRecord::from_row).transpose().map_err(Into::into)
    }

    pub(crate) async fn get_summary(
        &self,
        tx: &mut StoreTransaction,
        id: i64,
    ) -> Result<Option<InscriptionSummary>, StoreError> {
        let row = tx.query(GET_SUMMARY_SQL).bind(id).fetch_optional().await?;

        row.as_ref().map(InscriptionSummary::from_row).transpose().map_err(Into::into)
    }

    pub(crate) async fn list(
        &self,
        tx: &mut StoreTransaction,
        filter: &InscriptionFilter,
        page: PageRequest,
    ) -> Result<(Vec<InscriptionRecord>, i64), StoreError> {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params.push(status.as_str().to_owned());
        }

        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            conditions.push(
                "(LOWER(first_name) LIKE ? OR LOWER(last_name) LIKE ? \
                 OR LOWER(email) LIKE ? OR LOWER(program) LIKE ?)",
            );

            let term = format!("%{}%", search.to_lowercase());
            params.extend(std::iter::repeat_n(term, 4));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) AS count FROM inscriptions {where_clause}");
        let mut count_query = tx.query(&count_sql);

        for param in &params {
            count_query = count_query.bind(param.clone());
        }

        let total: i64 = count_query.fetch_one().await?.try_get("count")?;

        let list_sql = format!(
            "SELECT {LIST_COLUMNS} FROM inscriptions {where_clause} \
             ORDER BY {} {} LIMIT ? OFFSET ?",
            filter.sort_by.as_column(),
            filter.sort_order.as_sql(),
        );

        let mut list_query = tx.query(&list_sql);

        for param in params {
            list_query = list_query.bind(param);
        }

        let rows = list_query
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all()
            .await?;

        let records = rows
            .iter()
            .map(InscriptionRecord::from_row)
            .collect::<Result<_, _>>()?;

        Ok((records, total))
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut StoreTransaction,
        id: i64,
        status: InscriptionStatus,
        admin_notes: Option<&str>,
        processed_by: &str,
        now: &str,
    ) -> Result<u64, StoreError> {
        let result = tx
            .query(UPDATE_STATUS_SQL)
            .bind(status.as_str())
            .bind(admin_notes)
            .bind(processed_by)
            .bind(now)
            .bind(now)
            .bind(id)
            .execute()
            .await?;

        Ok(result.rows_affected)
    }

    pub(crate) async fn delete(
        &self,
        tx: &mut StoreTransaction,
        id: i64,
    ) -> Result<u64, StoreError> {
        let result = tx.query(DELETE_INSCRIPTION_SQL).bind(id).execute().await?;

        Ok(result.rows_affected)
    }

    pub(crate) async fn stats(
        &self,
        tx: &mut StoreTransaction,
    ) -> Result<InscriptionStats, StoreError> {
        let mut counts = [0_i64; 4];
        let statuses = [
            InscriptionStatus::Pending,
            InscriptionStatus::Approved,
            InscriptionStatus::Rejected,
            InscriptionStatus::UnderReview,
        ];

        for (slot, status) in counts.iter_mut().zip(statuses) {
            *slot = tx
                .query(COUNT_BY_STATUS_SQL)
                .bind(status.as_str())
                .fetch_one()
                .await?
                .try_get("count")?;
        }

        let rows = tx.query(PROGRAM_DISTRIBUTION_SQL).fetch_all().await?;
        let program_distribution = rows
            .iter()
            .map(|row| {
                Ok(ProgramCount {
                    program: row.try_get("program")?,
                    count: row.try_get("count")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()?;

        let [total_pending, total_approved, total_rejected, total_under_review] = counts;

        Ok(InscriptionStats {
            total_pending,
            total_approved,
            total_rejected,
            total_under_review,
            program_distribution,
        })
    }
}

fn bind_new_inscription<'a>(
    query: crate::database::StoreQuery<'a>,
    data: &NewInscription,
    now: &str,
) -> crate::database::StoreQuery<'a> {
    query
        .bind(data.first_name.clone())
        .bind(data.last_name.clone())
        .bind(data.email.clone())
        .bind(data.phone.clone())
        .bind(data.birth_date.clone())
        .bind(data.address.clone())
        .bind(data.city.clone())
        .bind(data.postal_code.clone())
        .bind(data.country.clone())
        .bind(data.program.clone())
        .bind(data.motivation.clone())
        .bind(InscriptionStatus::Pending.as_str())
        .bind(now)
        .bind(now)
}

pub(crate) fn decode_status(row: &AnyRow, column: &str) -> sqlx::Result<InscriptionStatus> {
    let value: String = row.try_get(column)?;

    InscriptionStatus::parse(&value).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: column.to_owned(),
        source: format!("unknown inscription status {value:?}").into(),
    })
}

impl<'r> FromRow<'r, AnyRow> for InscriptionRecord {
    fn from_row(row: &'r AnyRow) -> sqlx::Result<Self> {
        let birth_date: String = row.try_get("birth_date")?;

        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            birth_date: birth_date.parse().map_err(|error: jiff::Error| {
                sqlx::Error::ColumnDecode {
                    index: "birth_date".to_owned(),
                    source: Box::new(error),
                }
            })?,
            address: row.try_get("address")?,
            city: row.try_get("city")?,
            postal_code: row.try_get("postal_code")?,
            country: row.try_get("country")?,
            program: row.try_get("program")?,
            motivation: row.try_get("motivation")?,
            status: decode_status(row, "status")?,
            created_at: parse_timestamp("created_at", &row.try_get::<String, _>("created_at")?)?,
            updated_at: parse_timestamp("updated_at", &row.try_get::<String, _>("updated_at")?)?,
            admin_notes: row.try_get("admin_notes")?,
            processed_by: row.try_get("processed_by")?,
            processed_at: row
                .try_get::<Option<String>, _>("processed_at")?
                .map(|value| parse_timestamp("processed_at", &value))
                .transpose()?,
        })
    }
}

impl<'r> FromRow<'r, AnyRow> for InscriptionSummary {
    fn from_row(row: &'r AnyRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            program: row.try_get("program")?,
            status: decode_status(row, "status")?,
            created_at: parse_timestamp("created_at", &row.try_get::<String, _>("created_at")?)?,
        })
    }
}
