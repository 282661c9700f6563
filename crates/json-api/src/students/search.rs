use std::sync::Arc;

use salvo::{
    Depot, Writer,
    http::StatusError,
    oapi::{ToSchema, endpoint, extract::JsonBody},
    writing::Json,
};
use scolarite_app::domain::students::records::StudentRecord;
use serde::{Deserialize, Serialize};

use crate::{extensions::depot::DepotExt, state::State, students::errors};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct StudentSearchRequest {
    matricule: String,
}

/// Roster projection shown on the change-request form.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct StudentResponse {
    id: i64,
    matricule: String,
    first_name: String,
    last_name: String,
    current_specialty: String,
    palier: String,
    section: String,
    etat: String,
    groupe_td: Option<String>,
    groupe_tp: Option<String>,
}

impl From<StudentRecord> for StudentResponse {
    fn from(record: StudentRecord) -> Self {
        Self {
            id: record.id,
            matricule: record.matricule,
            first_name: record.first_name,
            last_name: record.last_name,
            current_specialty: record.current_specialty,
            palier: record.palier,
            section: record.section,
            etat: record.etat,
            groupe_td: record.groupe_td,
            groupe_tp: record.groupe_tp,
        }
    }
}

/// Exact-matricule lookup backing the change-request form.
#[endpoint(tags("students"), summary = "Find a student by matricule")]
pub(crate) async fn search(
    body: JsonBody<StudentSearchRequest>,
    depot: &Depot,
) -> Result<Json<StudentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let student = state
        .students
        .search_by_matricule(&body.into_inner().matricule)
        .await
        .map_err(errors::into_status_error)?;

    Ok(Json(student.into()))
}
