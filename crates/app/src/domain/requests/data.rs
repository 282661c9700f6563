//! Specialty-change request input data and validation.

use serde::Serialize;

use crate::domain::requests::records::RequestStatus;

pub const MIN_MOTIVATION_LEN: usize = 100;
pub const DEFAULT_PRIORITY: &str = "normal";

/// A submitted change-request form, prior to validation. User-facing
/// violation messages are in French, matching the student-facing form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChangeRequest {
    pub matricule: String,
    pub current_specialty: String,
    pub requested_specialty: String,
    pub motivation: String,
    pub priority: Option<String>,
}

impl NewChangeRequest {
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            matricule: self.matricule.trim().to_owned(),
            current_specialty: self.current_specialty.trim().to_owned(),
            requested_specialty: self.requested_specialty.trim().to_owned(),
            motivation: self.motivation.trim().to_owned(),
            priority: self.priority.as_deref().map(str::trim).map(str::to_owned),
        }
    }

    /// Collect every validation violation. Expects
    /// [`normalized`](Self::normalized) input.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.matricule.is_empty()
            || self.current_specialty.is_empty()
            || self.requested_specialty.is_empty()
            || self.motivation.is_empty()
        {
            errors.push("Tous les champs sont requis".to_owned());
        }

        if !self.current_specialty.is_empty()
            && self.current_specialty == self.requested_specialty
        {
            errors.push(
                "Vous ne pouvez pas demander un changement vers votre spécialité actuelle"
                    .to_owned(),
            );
        }

        if self.motivation.chars().count() < MIN_MOTIVATION_LEN {
            errors.push(format!(
                "La motivation doit contenir au moins {MIN_MOTIVATION_LEN} caractères"
            ));
        }

        errors
    }

    #[must_use]
    pub fn priority(&self) -> &str {
        self.priority
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PRIORITY)
    }
}

/// Admin decision applied to a change request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestUpdate {
    pub status: RequestStatus,
    pub admin_notes: Option<String>,
    pub processed_by: Option<String>,
}

/// Listing filters; `None` means unfiltered. Results are always newest-first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub requested_specialty: Option<String>,
}

/// Dashboard breakdowns for the change-request queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStats {
    pub requests_by_status: Vec<StatusCount>,
    pub requests_by_specialty: Vec<RequestedSpecialtyCount>,
    pub students_by_current_specialty: Vec<CurrentSpecialtyCount>,
    pub recent_requests_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestedSpecialtyCount {
    pub requested_specialty: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentSpecialtyCount {
    pub current_specialty: String,
    pub count: i64,
}
