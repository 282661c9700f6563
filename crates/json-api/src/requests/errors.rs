use salvo::http::StatusError;
use scolarite_app::domain::requests::RequestsServiceError;
use tracing::error;

pub(crate) fn into_status_error(error: RequestsServiceError) -> StatusError {
    match error {
        RequestsServiceError::Validation(violations) => {
            StatusError::bad_request().brief(violations.join("; "))
        }
        RequestsServiceError::StudentNotFound => {
            StatusError::not_found().brief("Étudiant non trouvé")
        }
        RequestsServiceError::NotFound => StatusError::not_found().brief("Demande non trouvée"),
        RequestsServiceError::PendingRequestExists => StatusError::conflict()
            .brief("Vous avez déjà une demande de changement de spécialité en cours"),
        RequestsServiceError::Sql(source) => {
            error!("requests storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
