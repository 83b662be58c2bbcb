//! Error types for ledger operations.

use thiserror::Error;

use crate::record::RecordId;

/// Result type alias using ledger's error type.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Failures raised by a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
  /// Writing the value would exceed the backend quota
  #[error("Storage quota exceeded writing '{key}': {bytes} bytes, quota {quota}")]
  QuotaExceeded { key: String, bytes: usize, quota: usize },

  /// Key cannot be used by this backend
  #[error("Invalid storage key: '{0}'")]
  InvalidKey(String),

  /// Backend cannot be reached
  #[error("Storage unavailable: {0}")]
  Unavailable(String),

  #[error("Storage I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Stored value is not valid JSON: {0}")]
  Serialization(#[from] serde_json::Error),
}

/// Core error type for record and profile operations.
#[derive(Error, Debug)]
pub enum LedgerError {
  /// No record with this id; the store was left unmodified
  #[error("Record not found: {0}")]
  NotFound(RecordId),

  /// Imported payload does not match the expected shape
  #[error("Malformed import payload: {0}")]
  MalformedImportPayload(String),

  #[error(transparent)]
  Storage(#[from] StorageError),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Resume file above the configured size limit
  #[error("File too large: {size} bytes, maximum {limit}")]
  ResumeTooLarge { size: usize, limit: usize },

  /// Input rejected before touching storage
  #[error("Invalid input: {0}")]
  Invalid(String),

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

impl LedgerError {
  /// Whether this error only reports a missing record
  pub fn is_not_found(&self) -> bool {
    matches!(self, LedgerError::NotFound(_))
  }
}
