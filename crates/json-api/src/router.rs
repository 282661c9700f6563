//! Route table.

use salvo::Router;

use crate::{auth, healthcheck, inscriptions, requests, students};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::healthcheck))
        .push(
            Router::with_path("inscriptions")
                .post(inscriptions::handlers::create)
                .push(Router::with_path("{id}").get(inscriptions::handlers::show)),
        )
        .push(Router::with_path("students").push(Router::with_path("search").post(students::search)))
        .push(
            Router::with_path("specialty-requests")
                .post(requests::handlers::create)
                .get(requests::handlers::index)
                .push(Router::with_path("{id}").patch(requests::handlers::update)),
        )
        .push(Router::with_path("specialty-stats").get(requests::handlers::stats))
        .push(admin_router())
}

/// Everything under `/admin` goes through the bearer-token middleware.
fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("inscriptions")
                .get(inscriptions::handlers::index)
                .push(
                    Router::with_path("{id}")
                        .get(inscriptions::handlers::get)
                        .patch(inscriptions::handlers::update)
                        .delete(inscriptions::handlers::delete)
                        .push(Router::with_path("status").patch(inscriptions::handlers::update)),
                ),
        )
        .push(Router::with_path("stats").get(inscriptions::handlers::stats))
}
