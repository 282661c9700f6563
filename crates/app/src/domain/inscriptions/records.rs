//! Inscription records.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

/// Review status of an inscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InscriptionStatus {
    Pending,
    Approved,
    Rejected,
    UnderReview,
}

impl InscriptionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::UnderReview => "under_review",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "under_review" => Some(Self::UnderReview),
            _ => None,
        }
    }

    /// Terminal statuses trigger a decision notification to the applicant.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// Inscription Record
#[derive(Debug, Clone, Serialize)]
pub struct InscriptionRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Date,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub program: String,
    pub motivation: String,
    pub status: InscriptionStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub admin_notes: Option<String>,
    pub processed_by: Option<String>,
    pub processed_at: Option<Timestamp>,
}

/// The public confirmation-page projection of an inscription.
#[derive(Debug, Clone, Serialize)]
pub struct InscriptionSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub program: String,
    pub status: InscriptionStatus,
    pub created_at: Timestamp,
}

/// Receipt returned after a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct InscriptionReceipt {
    pub id: i64,
    pub email: String,
    pub status: InscriptionStatus,
    pub submitted_at: Timestamp,
}
