//! Storefront entities as returned by the remote API.

pub mod category;
pub mod content;
pub mod hierarchy;
pub mod order;
pub mod product;
pub mod promo_code;
pub mod types;
pub mod user;
