pub mod admin;
pub mod auth;
pub mod backup;
pub mod entity;
pub mod health;
pub mod order;
pub mod product;
pub mod view;
