use core_types::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntentError {
    #[error("invalid navigation target: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum NavError {
    /// The href could not be resolved against the current URL.
    #[error(transparent)]
    Intent(#[from] IntentError),
    /// The render callback failed, synchronously or through its sink.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// Navigation capability used where no router is mounted.
    #[error("navigate() used outside a mounted router")]
    NotMounted,
}
