pub mod api;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod forms;
pub mod logging;
pub mod models;
pub mod session;
pub mod status;
pub mod ui;
pub mod views;
