//! Runtime configuration of the admin console.

pub mod config;
