use salvo::http::StatusError;
use scolarite_app::domain::students::StudentsServiceError;
use tracing::error;

pub(crate) fn into_status_error(error: StudentsServiceError) -> StatusError {
    match error {
        StudentsServiceError::MatriculeRequired => {
            StatusError::bad_request().brief("Le numéro de matricule est requis")
        }
        StudentsServiceError::NotFound => {
            StatusError::not_found().brief("Aucun étudiant trouvé avec ce matricule")
        }
        StudentsServiceError::Sql(source) => {
            error!("students storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
