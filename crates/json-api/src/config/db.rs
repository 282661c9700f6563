use std::path::PathBuf;

use clap::Args;
use scolarite_app::database::DatabaseSettings;

#[derive(Debug, Args)]
pub(crate) struct DatabaseConfig {
    /// Primary PostgreSQL connection string; falls back to SQLite when
    /// omitted or unreachable
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub(crate) database_url: Option<String>,

    /// Fallback SQLite database file
    #[arg(long, env = "SQLITE_PATH", default_value = "data/scolarite.db")]
    pub(crate) sqlite_path: PathBuf,
}

impl DatabaseConfig {
    #[must_use]
    pub(crate) fn settings(&self) -> DatabaseSettings {
        DatabaseSettings::new(self.database_url.clone(), self.sqlite_path.clone())
    }
}
