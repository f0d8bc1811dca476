//! Test utilities for WindowShop services.
//!
//! Provides `MockAuth` (signed access-token cookies) and the fixture loader.
//! Import in tests only; never in production code.

pub mod auth;
pub mod fixture;
