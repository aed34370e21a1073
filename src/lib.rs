pub mod api;
pub mod config;
pub mod internal;
pub mod shell;
pub mod utils;
