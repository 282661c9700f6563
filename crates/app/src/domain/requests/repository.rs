//! Specialty-change requests repository.

use sqlx::{FromRow, Row, any::AnyRow};

use crate::{
    database::{BackendKind, StoreError, StoreTransaction, parse_timestamp},
    domain::requests::{
        data::{
            CurrentSpecialtyCount, NewChangeRequest, RequestFilter, RequestStats,
            RequestedSpecialtyCount, StatusCount,
        },
        records::{RequestRecord, RequestStatus},
    },
    pagination::PageRequest,
};

const FIND_STUDENT_ID_SQL: &str = include_str!("sql/find_student_id.sql");
const FIND_PENDING_SQL: &str = include_str!("sql/find_pending_request.sql");
const CREATE_REQUEST_SQL: &str = include_str!("sql/create_request.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_request_status.sql");
const REQUESTS_BY_STATUS_SQL: &str = include_str!("sql/requests_by_status.sql");
const REQUESTS_BY_SPECIALTY_SQL: &str = include_str!("sql/requests_by_specialty.sql");
const STUDENTS_BY_SPECIALTY_SQL: &str = include_str!("sql/students_by_specialty.sql");
const COUNT_RECENT_SQL: &str = include_str!("sql/count_recent_requests.sql");

const LIST_BASE: &str = "FROM specialty_change_requests scr \
                         JOIN students s ON scr.student_matricule = s.matricule";

const LIST_COLUMNS: &str = "scr.id, scr.student_matricule, s.first_name, s.last_name, \
                            scr.current_specialty, scr.requested_specialty, scr.motivation, \
                            scr.status, scr.priority, scr.created_at, scr.admin_notes, \
                            scr.processed_by, scr.processed_at";

#[derive(Debug, Clone, Default)]
pub(crate) struct StoreRequestsRepository;

impl StoreRequestsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn student_exists(
        &self,
        tx: &mut StoreTransaction,
        matricule: &str,
    ) -> Result<bool, StoreError> {
        let row = tx.query(FIND_STUDENT_ID_SQL).bind(matricule).fetch_optional().await?;

        Ok(row.is_some())
    }

    pub(crate) async fn has_pending_request(
        &self,
        tx: &mut StoreTransaction,
        matricule: &str,
    ) -> Result<bool, StoreError> {
        let row = tx.query(FIND_PENDING_SQL).bind(matricule).fetch_optional().await?;

        Ok(row.is_some())
    }

    pub(crate) async fn create(
        &self,
        tx: &mut StoreTransaction,
        data: &NewChangeRequest,
        now: &str,
    ) -> Result<i64, StoreError> {
        match tx.kind() {
            BackendKind::Postgres => {
                let sql = format!("{} RETURNING id", CREATE_REQUEST_SQL.trim_end());
                let row = bind_new_request(tx.query(&sql), data, now).fetch_one().await?;

                row.try_get("id").map_err(Into::into)
            }
            BackendKind::Sqlite => {
                let result = bind_new_request(tx.query(CREATE_REQUEST_SQL), data, now)
                    .execute()
                    .await?;

                result.last_insert_id.ok_or(StoreError::NoInsertId)
            }
        }
    }

    pub(crate) async fn list(
        &self,
        tx: &mut StoreTransaction,
        filter: &RequestFilter,
        page: PageRequest,
    ) -> Result<(Vec<RequestRecord>, i64), StoreError> {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            conditions.push("scr.status = ?");
            params.push(status.as_str().to_owned());
        }

        if let Some(specialty) = filter
            .requested_specialty
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            conditions.push("scr.requested_specialty = ?");
            params.push(specialty.to_owned());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) AS count {LIST_BASE} {where_clause}");
        let mut count_query = tx.query(&count_sql);

        for param in &params {
            count_query = count_query.bind(param.clone());
        }

        let total: i64 = count_query.fetch_one().await?.try_get("count")?;

        let list_sql = format!(
            "SELECT {LIST_COLUMNS} {LIST_BASE} {where_clause} \
             ORDER BY scr.created_at DESC LIMIT ? OFFSET ?"
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
            .map(RequestRecord::from_row)
            .collect::<Result<_, _>>()?;

        Ok((records, total))
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut StoreTransaction,
        id: i64,
        status: RequestStatus,
        admin_notes: Option<&str>,
        processed_by: Option<&str>,
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

    pub(crate) async fn stats(
        &self,
        tx: &mut StoreTransaction,
        recent_cutoff: &str,
    ) -> Result<RequestStats, StoreError> {
        let rows = tx.query(REQUESTS_BY_STATUS_SQL).fetch_all().await?;
        let requests_by_status = rows
            .iter()
            .map(|row| {
                Ok(StatusCount {
                    status: row.try_get("status")?,
                    count: row.try_get("count")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()?;

        let rows = tx.query(REQUESTS_BY_SPECIALTY_SQL).fetch_all().await?;
        let requests_by_specialty = rows
            .iter()
            .map(|row| {
                Ok(RequestedSpecialtyCount {
                    requested_specialty: row.try_get("requested_specialty")?,
                    count: row.try_get("count")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()?;

        let rows = tx.query(STUDENTS_BY_SPECIALTY_SQL).fetch_all().await?;
        let students_by_current_specialty = rows
            .iter()
            .map(|row| {
                Ok(CurrentSpecialtyCount {
                    current_specialty: row.try_get("current_specialty")?,
                    count: row.try_get("count")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()?;

        let recent_requests_count = tx
            .query(COUNT_RECENT_SQL)
            .bind(recent_cutoff)
            .fetch_one()
            .await?
            .try_get("count")?;

        Ok(RequestStats {
            requests_by_status,
            requests_by_specialty,
            students_by_current_specialty,
            recent_requests_count,
        })
    }
}

fn bind_new_request<'a>(
    query: crate::database::StoreQuery<'a>,
    data: &NewChangeRequest,
    now: &str,
) -> crate::database::StoreQuery<'a> {
    query
        .bind(data.matricule.clone())
        .bind(data.current_specialty.clone())
        .bind(data.requested_specialty.clone())
        .bind(data.motivation.clone())
        .bind(data.priority().to_owned())
        .bind(RequestStatus::Pending.as_str())
        .bind(now)
        .bind(now)
}

impl<'r> FromRow<'r, AnyRow> for RequestRecord {
    fn from_row(row: &'r AnyRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            id: row.try_get("id")?,
            student_matricule: row.try_get("student_matricule")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            current_specialty: row.try_get("current_specialty")?,
            requested_specialty: row.try_get("requested_specialty")?,
            motivation: row.try_get("motivation")?,
            status: RequestStatus::parse(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "status".to_owned(),
                source: format!("unknown request status {status:?}").into(),
            })?,
            priority: row.try_get("priority")?,
            created_at: parse_timestamp("created_at", &row.try_get::<String, _>("created_at")?)?,
            admin_notes: row.try_get("admin_notes")?,
            processed_by: row.try_get("processed_by")?,
            processed_at: row
                .try_get::<Option<String>, _>("processed_at")?
                .map(|value| parse_timestamp("processed_at", &value))
                .transpose()?,
        })
    }
}
