use salvo::oapi::ToSchema;
use scolarite_app::domain::requests::records::RequestRecord;
use serde::Serialize;

/// Admin-facing projection of a change request, joined with the student's
/// name from the roster.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RequestResponse {
    pub(crate) id: i64,
    pub(crate) student_matricule: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) current_specialty: String,
    pub(crate) requested_specialty: String,
    pub(crate) motivation: String,
    pub(crate) status: String,
    pub(crate) priority: String,
    pub(crate) created_at: String,
    pub(crate) admin_notes: Option<String>,
    pub(crate) processed_by: Option<String>,
    pub(crate) processed_at: Option<String>,
}

impl From<RequestRecord> for RequestResponse {
    fn from(record: RequestRecord) -> Self {
        Self {
            id: record.id,
            student_matricule: record.student_matricule,
            first_name: record.first_name,
            last_name: record.last_name,
            current_specialty: record.current_specialty,
            requested_specialty: record.requested_specialty,
            motivation: record.motivation,
            status: record.status.as_str().to_owned(),
            priority: record.priority,
            created_at: record.created_at.to_string(),
            admin_notes: record.admin_notes,
            processed_by: record.processed_by,
            processed_at: record.processed_at.map(|at| at.to_string()),
        }
    }
}
