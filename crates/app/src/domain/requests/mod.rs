//! Specialty-change requests

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::RequestsServiceError;
pub use service::*;
