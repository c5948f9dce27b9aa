use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl ServiceError {
    pub fn validation(msg: &str) -> Self { Self::Validation(msg.to_string()) }
    pub fn not_found(msg: &str) -> Self { Self::NotFound(msg.to_string()) }

    /// Message safe to hand back to a client. Storage failures stay opaque.
    pub fn public_message(&self) -> &str {
        match self {
            Self::Validation(m) | Self::NotFound(m) => m,
            Self::Io(_) | Self::Serialize(_) => "Internal server error",
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
