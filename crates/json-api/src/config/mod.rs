//! Server configuration, sourced from CLI flags and environment variables.

mod auth;
mod db;
mod observability;
mod server;

use clap::Parser;

pub(crate) use auth::AuthConfig;
pub(crate) use db::DatabaseConfig;
pub(crate) use observability::{LogFormat, LoggingConfig};
pub(crate) use server::ServerRuntimeConfig;

#[derive(Debug, Parser)]
#[command(name = "scolarite-json", about = "JSON API for student inscriptions and specialty change requests", long_about = None)]
pub(crate) struct ServerConfig {
    #[command(flatten)]
    pub(crate) server: ServerRuntimeConfig,

    #[command(flatten)]
    pub(crate) database: DatabaseConfig,

    #[command(flatten)]
    pub(crate) auth: AuthConfig,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,
}

impl ServerConfig {
    /// Loads the configuration, reading a `.env` file first when one exists.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        let _env = dotenvy::dotenv();

        Self::try_parse()
    }

    #[must_use]
    pub(crate) fn socket_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_joins_host_and_port() -> testresult::TestResult {
        let config = ServerConfig::try_parse_from(["scolarite-json", "--api-token", "secret"])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:3000");

        Ok(())
    }
}
