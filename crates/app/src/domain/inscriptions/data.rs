//! Inscription input data and validation.

use jiff::{Zoned, civil::Date};

use crate::domain::inscriptions::records::InscriptionStatus;

pub const MIN_MOTIVATION_LEN: usize = 50;
pub const MIN_APPLICANT_AGE: i16 = 16;

/// A submitted application form, prior to validation.
///
/// `birth_date` stays textual here so that an unparseable date surfaces as a
/// validation message alongside the other violations instead of a
/// deserialization failure.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInscription {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub program: String,
    pub motivation: String,
}

impl NewInscription {
    /// Trim every field and lowercase the email, the canonical stored form.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_lowercase(),
            phone: self.phone.trim().to_owned(),
            birth_date: self.birth_date.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            postal_code: self.postal_code.trim().to_owned(),
            country: self.country.trim().to_owned(),
            program: self.program.trim().to_owned(),
            motivation: self.motivation.trim().to_owned(),
        }
    }

    /// Collect every validation violation; an empty vector means the form is
    /// acceptable. Expects [`normalized`](Self::normalized) input.
    #[must_use]
    pub fn validate(&self, today: Date) -> Vec<String> {
        let mut errors = Vec::new();

        if self.first_name.chars().count() < 2 {
            errors.push("First name must be at least 2 characters long".to_owned());
        }

        if self.last_name.chars().count() < 2 {
            errors.push("Last name must be at least 2 characters long".to_owned());
        }

        if !looks_like_email(&self.email) {
            errors.push("Please provide a valid email address".to_owned());
        }

        if !looks_like_phone(&self.phone) {
            errors.push("Please provide a valid phone number".to_owned());
        }

        let birth_date = self.birth_date();

        if birth_date.is_none() {
            errors.push("Please provide a valid birth date".to_owned());
        }

        if self.address.chars().count() < 5 {
            errors.push("Address must be at least 5 characters long".to_owned());
        }

        if self.city.chars().count() < 2 {
            errors.push("City must be at least 2 characters long".to_owned());
        }

        if self.postal_code.chars().count() < 2 {
            errors.push("Postal code is required".to_owned());
        }

        if self.country.chars().count() < 2 {
            errors.push("Country is required".to_owned());
        }

        if self.program.chars().count() < 2 {
            errors.push("Program selection is required".to_owned());
        }

        if self.motivation.chars().count() < MIN_MOTIVATION_LEN {
            errors.push(format!(
                "Motivation must be at least {MIN_MOTIVATION_LEN} characters long"
            ));
        }

        if let Some(birth) = birth_date
            && age_on(birth, today) < MIN_APPLICANT_AGE
        {
            errors.push("You must be at least 16 years old to apply".to_owned());
        }

        errors
    }

    #[must_use]
    pub fn birth_date(&self) -> Option<Date> {
        self.birth_date.parse().ok()
    }
}

/// Admin review decision applied to an inscription.
#[derive(Debug, Clone, PartialEq)]
pub struct InscriptionUpdate {
    pub status: InscriptionStatus,
    pub admin_notes: Option<String>,
}

/// Listing filters; `None` means unfiltered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InscriptionFilter {
    pub status: Option<InscriptionStatus>,
    pub search: Option<String>,
    pub sort_by: InscriptionSort,
    pub sort_order: SortOrder,
}

/// Allow-listed sort columns for the admin listing. Sort identifiers are
/// interpolated into SQL, so arbitrary column names are never accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InscriptionSort {
    Id,
    #[default]
    CreatedAt,
    UpdatedAt,
    FirstName,
    LastName,
    Email,
    Program,
    Status,
}

impl InscriptionSort {
    #[must_use]
    pub const fn as_column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Program => "program",
            Self::Status => "status",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::Id),
            "created_at" => Some(Self::CreatedAt),
            "updated_at" => Some(Self::UpdatedAt),
            "first_name" => Some(Self::FirstName),
            "last_name" => Some(Self::LastName),
            "email" => Some(Self::Email),
            "program" => Some(Self::Program),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

/// Listing sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

/// Dashboard counters.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InscriptionStats {
    pub total_pending: i64,
    pub total_approved: i64,
    pub total_rejected: i64,
    pub total_under_review: i64,
    pub program_distribution: Vec<ProgramCount>,
}

/// One slice of the per-program breakdown.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProgramCount {
    pub program: String,
    pub count: i64,
}

/// Today's civil date in the system time zone.
#[must_use]
pub fn today() -> Date {
    Zoned::now().date()
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !value.contains(char::is_whitespace)
}

fn looks_like_phone(value: &str) -> bool {
    let digits: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();

    let rest = digits.strip_prefix('+').unwrap_or(&digits);

    (7..=15).contains(&rest.len()) && rest.chars().all(|c| c.is_ascii_digit())
}

fn age_on(birth: Date, today: Date) -> i16 {
    let mut age = today.year() - birth.year();

    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }

    age
}
