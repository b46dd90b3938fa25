//! Error types for the cart widget and receipt exporter

use thiserror::Error;

/// Result type alias for widget operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the cart widget or receipt exporter
#[derive(Error, Debug)]
pub enum Error {
    /// The page has no element with the given id
    #[error("No element with id '{0}' on the page")]
    MissingElement(String),

    /// A `buy-id` attribute did not parse as an integer
    #[error("Invalid product id attribute: '{0}'")]
    InvalidProductId(String),

    /// A `data-price` attribute did not parse as a non-negative integer
    #[error("Invalid price attribute: '{0}'")]
    InvalidPrice(String),

    /// Failed to load a page
    #[error("Failed to load page: {0}")]
    Load(String),

    /// Failed to navigate to a checkout target
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// Filesystem error while writing the exported document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
