//! sea-orm entities for the storefront collections.

pub mod measurements;
pub mod orders;
pub mod photos;
pub mod products;
pub mod users;
