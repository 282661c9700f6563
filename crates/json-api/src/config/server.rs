use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct ServerRuntimeConfig {
    /// Address the server listens on
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub(crate) host: String,

    /// Port the server listens on
    #[arg(long, env = "SERVER_PORT", default_value_t = 3000)]
    pub(crate) port: u16,
}
