//! Auth types shared across WindowShop crates.
//!
//! Provides JWT validation and the access-token cookie builders.

pub mod cookie;
pub mod token;
