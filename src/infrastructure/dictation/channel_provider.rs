use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::domain::invoice::{
  DictationEvent, DictationProvider, DictationStream, InvoiceError, InvoiceField,
};

type ActiveTarget = Option<(InvoiceField, UnboundedSender<DictationEvent>)>;

/// In-process dictation provider. Transcripts are pushed through a
/// [`DictationFeed`], typically by a bridge to a platform recogniser.
pub struct ChannelDictationProvider {
  target: Arc<Mutex<ActiveTarget>>,
}

/// Sending half handed to whatever produces transcripts.
#[derive(Clone)]
pub struct DictationFeed {
  target: Arc<Mutex<ActiveTarget>>,
}

impl ChannelDictationProvider {
  pub fn new() -> Self {
    Self {
      target: Arc::new(Mutex::new(None)),
    }
  }

  pub fn feed(&self) -> DictationFeed {
    DictationFeed {
      target: self.target.clone(),
    }
  }
}

impl Default for ChannelDictationProvider {
  fn default() -> Self {
    Self::new()
  }
}

impl DictationProvider for ChannelDictationProvider {
  fn start(&mut self, field: InvoiceField) -> Result<DictationStream, InvoiceError> {
    let (sender, receiver) = mpsc::unbounded_channel();
    *lock(&self.target) = Some((field, sender));
    tracing::debug!(field = %field, "Channel dictation listening");
    Ok(receiver)
  }

  fn stop(&mut self) {
    // Dropping the sender closes the stream.
    lock(&self.target).take();
  }
}

impl DictationFeed {
  /// Sends the transcript recognised so far. Returns false when nobody is listening.
  pub fn push(&self, transcript: impl Into<String>) -> bool {
    let guard = lock(&self.target);
    match guard.as_ref() {
      Some((field, sender)) => sender
        .send(DictationEvent::new(*field, transcript))
        .is_ok(),
      None => false,
    }
  }

  pub fn target(&self) -> Option<InvoiceField> {
    lock(&self.target).as_ref().map(|(field, _)| *field)
  }
}

fn lock(target: &Mutex<ActiveTarget>) -> MutexGuard<'_, ActiveTarget> {
  target.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
