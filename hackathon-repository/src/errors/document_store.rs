//! Error types for the document store.
use thiserror::Error;

/// Represents errors that can occur while talking to the document store.
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("MongoDB error: {0}")]
    MongoError(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] mongodb::bson::ser::Error),

    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] mongodb::bson::de::Error),
}

impl DocumentStoreError {
    /// Returns true when the store could not be reached.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::MongoError(e) => matches!(
                *e.kind,
                mongodb::error::ErrorKind::ServerSelection { .. }
                    | mongodb::error::ErrorKind::Io(_)
                    | mongodb::error::ErrorKind::ConnectionPoolCleared { .. }
            ),
            _ => false,
        }
    }
}
