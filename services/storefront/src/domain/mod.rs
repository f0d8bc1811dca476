pub mod access;
pub mod filter;
pub mod patch;
pub mod query;
pub mod repository;
pub mod types;
