//! Domain types shared across WindowShop crates.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod entity;
pub mod order;
pub mod role;
