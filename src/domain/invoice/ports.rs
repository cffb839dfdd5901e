use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedReceiver;

use super::dictation::DictationEvent;
use super::errors::InvoiceError;
use super::value_objects::InvoiceField;

pub type DictationStream = UnboundedReceiver<DictationEvent>;

/// Speech-to-text engine feeding transcripts for one field at a time.
pub trait DictationProvider: Send {
  fn start(&mut self, field: InvoiceField) -> Result<DictationStream, InvoiceError>;
  fn stop(&mut self);
}

/// Resolved once at startup and handed to the session.
pub enum DictationCapability {
  Available(Box<dyn DictationProvider>),
  Unavailable,
}

impl DictationCapability {
  pub fn available(provider: impl DictationProvider + 'static) -> Self {
    DictationCapability::Available(Box::new(provider))
  }

  pub fn is_available(&self) -> bool {
    matches!(self, DictationCapability::Available(_))
  }
}

#[async_trait]
pub trait PdfGenerator: Send + Sync {
  /// Prints the rendered invoice HTML and returns the written PDF path.
  async fn generate_invoice_pdf(&self, html: &str) -> Result<PathBuf, InvoiceError>;
}
