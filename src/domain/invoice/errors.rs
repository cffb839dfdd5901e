use super::value_objects::{InvoiceField, ValueObjectError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Line item index {index} is out of range (invoice has {len} items)")]
  IndexOutOfRange { index: usize, len: usize },

  #[error("Line item not found: {0}")]
  LineItemNotFound(Uuid),

  #[error("Unsupported capability: {0}")]
  UnsupportedCapability(String),

  #[error("Dictation is already active for field '{active}'")]
  DictationAlreadyActive { active: InvoiceField },

  #[error("Field '{0}' does not accept dictation")]
  NotDictatable(InvoiceField),

  #[error("Template error: {0}")]
  Template(#[from] tera::Error),

  #[error("PDF generation failed: {0}")]
  PdfGenerationFailed(String),
}
