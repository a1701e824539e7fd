//! Error type for HTML list import

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// Raised by a paragraph converter; passed through the list converter unchanged
    #[error("paragraph conversion failed: {message}")]
    Paragraph { message: String },
    #[error("failed to render ADF: {0}")]
    Render(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ImportError {
    pub fn paragraph(message: impl Into<String>) -> Self {
        ImportError::Paragraph {
            message: message.into(),
        }
    }
}
