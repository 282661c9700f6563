use salvo::http::StatusError;
use scolarite_app::domain::inscriptions::InscriptionsServiceError;
use tracing::error;

pub(crate) fn into_status_error(error: InscriptionsServiceError) -> StatusError {
    match error {
        InscriptionsServiceError::Validation(violations) => {
            StatusError::bad_request().brief(violations.join("; "))
        }
        InscriptionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("An application with this email address already exists")
        }
        InscriptionsServiceError::NotFound => {
            StatusError::not_found().brief("Inscription not found")
        }
        InscriptionsServiceError::InvalidStatus => {
            StatusError::bad_request().brief("Invalid status value")
        }
        InscriptionsServiceError::Sql(source) => {
            error!("inscriptions storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
