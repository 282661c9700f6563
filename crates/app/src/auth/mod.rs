//! Admin authentication.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::AuthServiceError;
pub use models::AdminIdentity;
pub use service::*;
