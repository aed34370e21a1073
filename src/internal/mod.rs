pub mod actions;
pub mod desktop;
pub mod error;
pub mod models;
pub mod notification;
pub mod refresh;
pub mod scheduler;
pub mod settings;
pub mod settings_dialog;
