//! Auth models.

/// The identity a verified admin token resolves to; stamped into
/// `processed_by` on review decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub email: String,
}

impl AdminIdentity {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }
}
