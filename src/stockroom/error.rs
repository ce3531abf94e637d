use thiserror::Error;

/// The four failure classes a presentation layer has to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Io,
    Format,
}

#[derive(Error, Debug)]
pub enum StockError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Quantity must be a non-negative integer (got '{0}')")]
    InvalidQuantity(String),

    #[error("Product number '{0}' already exists")]
    DuplicateProductNumber(String),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unexpected data format: {0}")]
    Format(String),
}

impl StockError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StockError::MissingField(_)
            | StockError::InvalidQuantity(_)
            | StockError::DuplicateProductNumber(_) => ErrorKind::Validation,
            StockError::NotFound(_) => ErrorKind::NotFound,
            StockError::Io(_) | StockError::Serialization(_) => ErrorKind::Io,
            StockError::Format(_) => ErrorKind::Format,
        }
    }
}

pub type Result<T> = std::result::Result<T, StockError>;
