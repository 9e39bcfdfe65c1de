//! Services translating table requests into repository calls and view data.

pub mod errors;
pub mod tables;

pub use errors::{ServiceError, ServiceResult};
