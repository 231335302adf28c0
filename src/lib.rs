pub mod alert;
pub mod app;
pub mod cli;
pub mod config;
pub mod form;
pub mod geolocation;
pub mod map;
pub mod shell;
pub mod types;
pub mod utils;
pub mod validate;
