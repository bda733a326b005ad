// Defines a custom error type and a result type alias using the thiserror crate.
use thiserror::Error;

// Make the response module public
pub mod response;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    // The #[from] attribute automatically converts a std::io::Error into an AppError::File.
    #[error("File error: {0}")]
    File(#[from] std::io::Error),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
