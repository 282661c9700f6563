//! Specialty-change request records.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Review status of a change request. Unlike inscriptions there is no
/// `under_review` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// A change request joined with the student it belongs to, as shown in the
/// admin listing.
#[derive(Debug, Clone, Serialize)]
pub struct RequestRecord {
    pub id: i64,
    pub student_matricule: String,
    pub first_name: String,
    pub last_name: String,
    pub current_specialty: String,
    pub requested_specialty: String,
    pub motivation: String,
    pub status: RequestStatus,
    pub priority: String,
    pub created_at: Timestamp,
    pub admin_notes: Option<String>,
    pub processed_by: Option<String>,
    pub processed_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_text() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            assert_eq!(RequestStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_under_review_is_not_a_request_status() {
        assert_eq!(RequestStatus::parse("under_review"), None);
    }
}
