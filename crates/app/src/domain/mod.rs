//! Domain services.

pub mod inscriptions;
pub mod requests;
pub mod students;
