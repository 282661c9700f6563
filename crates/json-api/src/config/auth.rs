use clap::Args;
use scolarite_app::context::AuthSettings;

#[derive(Debug, Args)]
pub(crate) struct AuthConfig {
    /// Bearer token granting access to the admin routes
    #[arg(long = "api-token", env = "ADMIN_API_TOKEN", hide_env_values = true)]
    pub(crate) api_token: String,

    /// Email of the administrator the token authenticates as
    #[arg(long, env = "ADMIN_EMAIL", default_value = "admin@example.com")]
    pub(crate) admin_email: String,
}

impl AuthConfig {
    #[must_use]
    pub(crate) fn settings(&self) -> AuthSettings {
        AuthSettings::new(self.api_token.clone(), self.admin_email.clone())
    }
}
