use thiserror::Error as ThisError;

use crate::constants::MIN_ROUTE_POINTS;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("need at least {required} points for a route, got {found}")]
    InsufficientPoints { found: usize, required: usize },
    /// Incomplete points must be filtered before optimizing; reaching the core is a caller bug.
    #[error("point #{index} ({label:?}) is missing a coordinate")]
    IncompletePoint { index: usize, label: String },
    #[error("no points to search")]
    EmptyInput,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    pub(crate) fn insufficient_points(found: usize) -> Self {
        Self::InsufficientPoints {
            found,
            required: MIN_ROUTE_POINTS,
        }
    }
}
