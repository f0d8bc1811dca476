mod helpers;

mod access_test;
mod admin_test;
mod auth_test;
mod backup_test;
mod catalog_test;
mod entity_test;
mod order_test;
