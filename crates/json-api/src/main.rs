//! Scolarite JSON API server.

use std::process;

use salvo::{
    catch_panic::CatchPanic,
    oapi::{
        OpenApi, SecurityScheme,
        security::{Http, HttpAuthScheme},
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use scolarite_app::context::AppContext;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod extensions;
mod healthcheck;
mod inscriptions;
mod pagination;
mod requests;
mod router;
mod shutdown;
mod state;
mod students;
#[cfg(test)]
mod test_helpers;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() {
    let config = match config::ServerConfig::load() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            process::exit(1);
        }
    };

    init_tracing(&config.logging);

    let app = match AppContext::initialize(&config.database.settings(), &config.auth.settings())
        .await
    {
        Ok(app) => app,
        Err(error) => {
            error!("failed to initialize the application: {error}");
            process::exit(1);
        }
    };

    let state = state::State::from_app_context(app);
    info!("serving on {} ({})", config.socket_addr(), state.backend.as_str());

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(affix_state::inject(state))
        .push(router::app_router());

    let doc = OpenApi::new("Scolarite JSON API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .unshift(doc.into_router("/api-doc/openapi.json"))
        .unshift(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let acceptor = TcpListener::new(config.socket_addr()).bind().await;
    let server = Server::new(acceptor);
    let handle = server.handle();

    let _signals = tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signals: {error}");
        }
    });

    server.serve(router).await;
}

fn init_tracing(logging: &config::LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    match logging.log_format {
        config::LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        config::LogFormat::Plain => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
