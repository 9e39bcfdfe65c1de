//! DTO modules that bridge services with templates.

pub mod columns;
pub mod tables;
