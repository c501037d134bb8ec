pub mod acquire;
pub mod app;
pub mod store;
