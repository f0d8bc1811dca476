//! Cross-cutting plumbing shared by WindowShop services.
//!
//! Nothing in here knows about products or orders; services layer their own
//! error enums and state on top.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
