//! Database connection management.
//!
//! The store prefers PostgreSQL and falls back to a local SQLite file when
//! the primary backend is unreachable at startup. Call sites write canonical
//! SQL with `?` placeholders; [`translate`] rewrites them for whichever
//! backend was selected, so the same templates run against both.

mod schema;
mod translate;

pub use schema::{DEFAULT_ADMIN_EMAIL, ensure_schema, seed_default_admin};
pub(crate) use schema::sha256_hex;

use std::{path::PathBuf, time::Duration};

use jiff::Timestamp;
use sqlx::{
    Any, AnyPool, Arguments, Transaction,
    any::{AnyArguments, AnyPoolOptions, AnyRow, install_default_drivers},
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tracing::{info, warn};

/// Which relational backend the process selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// The primary networked backend.
    Postgres,

    /// The embedded file-backed fallback.
    Sqlite,
}

impl BackendKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgresql",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Connection settings for the backend selector.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// Primary backend URL. `None` skips straight to the fallback.
    pub postgres_url: Option<String>,

    /// Fallback database file, created on first use.
    pub sqlite_path: PathBuf,

    /// Bound on the initial connection attempt.
    pub connect_timeout: Duration,

    /// Pool size for either backend.
    pub max_connections: u32,
}

impl DatabaseSettings {
    #[must_use]
    pub fn new(postgres_url: Option<String>, sqlite_path: PathBuf) -> Self {
        Self {
            postgres_url,
            sqlite_path,
            connect_timeout: Duration::from_secs(3),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no database backend is reachable")]
    Unavailable {
        /// Why the primary backend was rejected, when one was configured.
        postgres: Option<sqlx::Error>,

        #[source]
        sqlite: sqlx::Error,
    },

    #[error("failed to create fallback database directory {path}")]
    FallbackDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("query failed")]
    Query(#[from] sqlx::Error),

    #[error("failed to encode query parameter")]
    Encode(#[source] sqlx::error::BoxDynError),

    #[error("backend did not report an inserted row id")]
    NoInsertId,
}

/// Coarse classification used by domain error mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    RowNotFound,
    UniqueViolation,
    ForeignKeyViolation,
    Other,
}

impl StoreError {
    #[must_use]
    pub fn kind(&self) -> StoreErrorKind {
        let Self::Query(error) = self else {
            return StoreErrorKind::Other;
        };

        if matches!(error, sqlx::Error::RowNotFound) {
            return StoreErrorKind::RowNotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => StoreErrorKind::UniqueViolation,
            Some(ErrorKind::ForeignKeyViolation) => StoreErrorKind::ForeignKeyViolation,
            _ => StoreErrorKind::Other,
        }
    }
}

/// A positional query parameter.
///
/// Parameters are bound in order of appearance, matching the canonical `?`
/// placeholders of the query template.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    Null,
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

impl From<Option<&str>> for SqlValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Result of a write statement in the canonical shape.
///
/// `last_insert_id` is reported by the SQLite driver; PostgreSQL call sites
/// use `RETURNING` instead and see `None` here.
#[derive(Debug, Clone, Copy)]
pub struct ExecResult {
    pub rows_affected: u64,
    pub last_insert_id: Option<i64>,
}

/// Handle to the selected backend.
///
/// Constructed once at startup by [`Store::connect`] and injected into every
/// service; a query can therefore never run before backend selection
/// completed.
#[derive(Debug, Clone)]
pub struct Store {
    pool: AnyPool,
    kind: BackendKind,
}

impl Store {
    /// Select a backend: try PostgreSQL within the configured timeout, fall
    /// back to the SQLite file otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when neither backend can be
    /// opened. Selection happens once per process.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        install_default_drivers();

        let postgres_error = match &settings.postgres_url {
            Some(url) => match Self::open(url, settings).await {
                Ok(pool) => {
                    info!("connected to PostgreSQL");

                    return Ok(Self {
                        pool,
                        kind: BackendKind::Postgres,
                    });
                }
                Err(error) => {
                    warn!("PostgreSQL connection failed, falling back to SQLite: {error}");

                    Some(error)
                }
            },
            None => None,
        };

        if let Some(dir) = settings.sqlite_path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::FallbackDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let url = format!("sqlite://{}?mode=rwc", settings.sqlite_path.display());

        match Self::open(&url, settings).await {
            Ok(pool) => {
                info!(path = %settings.sqlite_path.display(), "connected to SQLite fallback");

                Ok(Self {
                    pool,
                    kind: BackendKind::Sqlite,
                })
            }
            Err(sqlite) => Err(StoreError::Unavailable {
                postgres: postgres_error,
                sqlite,
            }),
        }
    }

    async fn open(url: &str, settings: &DatabaseSettings) -> Result<AnyPool, sqlx::Error> {
        AnyPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.connect_timeout)
            .connect(url)
            .await
    }

    #[must_use]
    pub const fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Start building a query from a canonical template.
    ///
    /// Placeholders are rewritten for the active backend up front, so the
    /// template may use either `?` or `$n` syntax.
    #[must_use]
    pub fn query(&self, template: &str) -> StoreQuery<'_> {
        StoreQuery {
            target: QueryTarget::Pool(&self.pool),
            sql: translate::for_backend(template, self.kind),
            params: Vec::new(),
        }
    }

    /// Run an unprepared statement (DDL and other non-parameterized SQL).
    pub(crate) async fn execute_raw(&self, sql: &str) -> Result<(), StoreError> {
        sqlx::raw_sql(sql).execute(&self.pool).await?;

        Ok(())
    }

    /// Begin a transaction on the active backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the pool cannot provide a connection.
    pub async fn begin(&self) -> Result<StoreTransaction, StoreError> {
        let tx = self.pool.begin().await?;

        Ok(StoreTransaction {
            tx,
            kind: self.kind,
        })
    }
}

/// An open transaction; dropped without [`commit`](Self::commit) it rolls
/// back.
#[derive(Debug)]
pub struct StoreTransaction {
    tx: Transaction<'static, Any>,
    kind: BackendKind,
}

impl StoreTransaction {
    #[must_use]
    pub const fn kind(&self) -> BackendKind {
        self.kind
    }

    #[must_use]
    pub fn query(&mut self, template: &str) -> StoreQuery<'_> {
        StoreQuery {
            sql: translate::for_backend(template, self.kind),
            target: QueryTarget::Tx(&mut self.tx),
            params: Vec::new(),
        }
    }

    /// # Errors
    ///
    /// Returns an error when the backend rejects the commit.
    pub async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;

        Ok(())
    }
}

enum QueryTarget<'a> {
    Pool(&'a AnyPool),
    Tx(&'a mut Transaction<'static, Any>),
}

/// A translated query plus its ordered parameters.
pub struct StoreQuery<'a> {
    target: QueryTarget<'a>,
    sql: String,
    params: Vec<SqlValue>,
}

impl StoreQuery<'_> {
    #[must_use]
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());

        self
    }

    /// # Errors
    ///
    /// Returns an error when parameter encoding or the query itself fails.
    pub async fn fetch_all(self) -> Result<Vec<AnyRow>, StoreError> {
        let arguments = build_arguments(&self.params)?;
        let query = sqlx::query_with::<Any, _>(&self.sql, arguments);

        let rows = match self.target {
            QueryTarget::Pool(pool) => query.fetch_all(pool).await?,
            QueryTarget::Tx(tx) => query.fetch_all(&mut **tx).await?,
        };

        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns an error when parameter encoding or the query itself fails.
    pub async fn fetch_optional(self) -> Result<Option<AnyRow>, StoreError> {
        let arguments = build_arguments(&self.params)?;
        let query = sqlx::query_with::<Any, _>(&self.sql, arguments);

        let row = match self.target {
            QueryTarget::Pool(pool) => query.fetch_optional(pool).await?,
            QueryTarget::Tx(tx) => query.fetch_optional(&mut **tx).await?,
        };

        Ok(row)
    }

    /// # Errors
    ///
    /// Returns [`sqlx::Error::RowNotFound`] (wrapped) when no row matches,
    /// or an error when parameter encoding or the query itself fails.
    pub async fn fetch_one(self) -> Result<AnyRow, StoreError> {
        let arguments = build_arguments(&self.params)?;
        let query = sqlx::query_with::<Any, _>(&self.sql, arguments);

        let row = match self.target {
            QueryTarget::Pool(pool) => query.fetch_one(pool).await?,
            QueryTarget::Tx(tx) => query.fetch_one(&mut **tx).await?,
        };

        Ok(row)
    }

    /// # Errors
    ///
    /// Returns an error when parameter encoding or the statement itself
    /// fails.
    pub async fn execute(self) -> Result<ExecResult, StoreError> {
        let arguments = build_arguments(&self.params)?;
        let query = sqlx::query_with::<Any, _>(&self.sql, arguments);

        let result = match self.target {
            QueryTarget::Pool(pool) => query.execute(pool).await?,
            QueryTarget::Tx(tx) => query.execute(&mut **tx).await?,
        };

        Ok(ExecResult {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        })
    }
}

fn build_arguments(params: &[SqlValue]) -> Result<AnyArguments<'_>, StoreError> {
    let mut arguments = AnyArguments::default();

    for value in params {
        let added = match value {
            SqlValue::Text(text) => arguments.add(text.as_str()),
            SqlValue::Int(int) => arguments.add(*int),
            SqlValue::Null => arguments.add(Option::<String>::None),
        };

        added.map_err(StoreError::Encode)?;
    }

    Ok(arguments)
}

/// Current time as the canonical stored representation: ISO-8601 UTC at
/// second precision, identical on both backends and safe for lexicographic
/// comparison in SQL.
#[must_use]
pub fn now_utc() -> String {
    format_timestamp(Timestamp::now())
}

#[must_use]
pub fn format_timestamp(timestamp: Timestamp) -> String {
    timestamp.strftime("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Decode a stored timestamp column.
pub(crate) fn parse_timestamp(column: &str, value: &str) -> Result<Timestamp, sqlx::Error> {
    value.parse().map_err(|error: jiff::Error| sqlx::Error::ColumnDecode {
        index: column.to_owned(),
        source: Box::new(error),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_names() {
        assert_eq!(BackendKind::Postgres.as_str(), "postgresql");
        assert_eq!(BackendKind::Sqlite.as_str(), "sqlite");
    }

    #[test]
    fn test_now_utc_round_trips() {
        let now = now_utc();

        assert!(parse_timestamp("created_at", &now).is_ok());
        assert!(now.ends_with('Z'), "expected UTC designator: {now}");
    }

    #[test]
    fn test_format_timestamp_is_second_precision() {
        let formatted = format_timestamp(Timestamp::UNIX_EPOCH);

        assert_eq!(formatted, "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_sql_value_conversions() {
        assert_eq!(SqlValue::from("a"), SqlValue::Text("a".into()));
        assert_eq!(SqlValue::from(7_i64), SqlValue::Int(7));
        assert_eq!(SqlValue::from(Option::<String>::None), SqlValue::Null);
        assert_eq!(
            SqlValue::from(Some("b".to_owned())),
            SqlValue::Text("b".into())
        );
    }
}
