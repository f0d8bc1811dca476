pub mod backup;
pub mod dashboard;
pub mod edge;
pub mod entity;
pub mod identity;
pub mod order;
pub mod product;
pub mod token;
pub mod user;
