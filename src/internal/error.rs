//! Error taxonomy shared by the feed client, settings store and settings dialog.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Connection failure, timeout, or a non-success HTTP status.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response arrived but its body was not what the API promises.
    #[error("unexpected API response: {0}")]
    Api(String),

    /// Settings file could not be read or written.
    #[error("could not access {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad user input in the settings dialog.
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    /// Short category label shown as the notification subtitle.
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Network(_) => "Network Error",
            AppError::Api(_) => "API Error",
            AppError::Persistence { .. } => "Persistence Error",
            AppError::Validation(_) => "Invalid Input",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
