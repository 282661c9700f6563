//! Student records.

use jiff::Timestamp;
use serde::Serialize;

/// One row of the imported student roster.
#[derive(Debug, Clone, Serialize)]
pub struct StudentRecord {
    pub id: i64,
    pub matricule: String,
    pub first_name: String,
    pub last_name: String,
    pub current_specialty: String,
    pub palier: String,
    pub section: String,
    pub etat: String,
    pub groupe_td: Option<String>,
    pub groupe_tp: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
