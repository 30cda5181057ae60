//! Custom extractors for Axum handlers
//!
//! Turn the raw request into a requester context and validated DTOs.

mod requester;
mod validated;

pub use requester::Requester;
pub use validated::{ValidatedPath, ValidatedQuery};
