//! Response bodies shared by several inscription handlers.

use salvo::oapi::ToSchema;
use scolarite_app::domain::inscriptions::records::InscriptionRecord;
use serde::Serialize;

/// Full admin-facing projection of an inscription.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct InscriptionResponse {
    pub(crate) id: i64,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) birth_date: String,
    pub(crate) address: String,
    pub(crate) city: String,
    pub(crate) postal_code: String,
    pub(crate) country: String,
    pub(crate) program: String,
    pub(crate) motivation: String,
    pub(crate) status: String,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
    pub(crate) admin_notes: Option<String>,
    pub(crate) processed_by: Option<String>,
    pub(crate) processed_at: Option<String>,
}

impl From<InscriptionRecord> for InscriptionResponse {
    fn from(record: InscriptionRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            phone: record.phone,
            birth_date: record.birth_date.to_string(),
            address: record.address,
            city: record.city,
            postal_code: record.postal_code,
            country: record.country,
            program: record.program,
            motivation: record.motivation,
            status: record.status.as_str().to_owned(),
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
            admin_notes: record.admin_notes,
            processed_by: record.processed_by,
            processed_at: record.processed_at.map(|at| at.to_string()),
        }
    }
}
