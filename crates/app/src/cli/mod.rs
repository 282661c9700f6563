use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use scolarite_app::database::DatabaseSettings;

mod migrate;
mod seed_admin;

#[derive(Debug, Parser)]
#[command(name = "scolarite-app", about = "Scolarite ops CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Bring the schema of the selected backend up to date.
    Migrate(migrate::MigrateArgs),

    /// Insert the bootstrap administrator account if absent.
    SeedAdmin(seed_admin::SeedAdminArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Migrate(args) => migrate::run(args).await,
            Commands::SeedAdmin(args) => seed_admin::run(args).await,
        }
    }
}

/// Backend selection flags shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct StoreArgs {
    /// Primary PostgreSQL connection string; falls back to SQLite when
    /// omitted or unreachable
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Fallback SQLite database file
    #[arg(long, env = "SQLITE_PATH", default_value = "data/scolarite.db")]
    sqlite_path: PathBuf,
}

impl StoreArgs {
    pub(crate) fn settings(&self) -> DatabaseSettings {
        DatabaseSettings::new(self.database_url.clone(), self.sqlite_path.clone())
    }
}
