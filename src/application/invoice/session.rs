use tokio::sync::mpsc::error::TryRecvError;

use crate::domain::document::{InvoicePreview, PrintDocument};
use crate::domain::invoice::{
  DictationCapability, DictationStream, InvoiceError, InvoiceField, InvoiceModel,
};

struct ActiveDictation {
  field: InvoiceField,
  stream: DictationStream,
}

/// One user's editing session: the invoice model plus the dictation
/// capability resolved at startup.
///
/// At most one field listens to dictation at a time. The subscription is
/// released on `stop_dictation` or when the session is dropped.
pub struct InvoiceSession {
  model: InvoiceModel,
  dictation: DictationCapability,
  active: Option<ActiveDictation>,
}

impl InvoiceSession {
  pub fn new(model: InvoiceModel, dictation: DictationCapability) -> Self {
    Self {
      model,
      dictation,
      active: None,
    }
  }

  pub fn model(&self) -> &InvoiceModel {
    &self.model
  }

  pub fn model_mut(&mut self) -> &mut InvoiceModel {
    &mut self.model
  }

  pub fn preview(&self) -> InvoicePreview {
    InvoicePreview::render(self.model.state(), self.model.currency_symbol())
  }

  pub fn print_document(&self) -> PrintDocument {
    PrintDocument::render(self.model.state(), self.model.currency_symbol())
  }

  pub fn dictation_target(&self) -> Option<InvoiceField> {
    self.active.as_ref().map(|active| active.field)
  }

  pub fn start_dictation(&mut self, field: InvoiceField) -> Result<(), InvoiceError> {
    if !field.accepts_dictation() {
      return Err(InvoiceError::NotDictatable(field));
    }
    if let Some(active) = &self.active {
      return Err(InvoiceError::DictationAlreadyActive {
        active: active.field,
      });
    }
    let provider = match &mut self.dictation {
      DictationCapability::Available(provider) => provider,
      DictationCapability::Unavailable => {
        return Err(InvoiceError::UnsupportedCapability(
          "speech recognition is not available in this environment".to_string(),
        ));
      }
    };

    let stream = provider.start(field)?;
    self.active = Some(ActiveDictation { field, stream });
    tracing::info!(field = %field, "Dictation started");
    Ok(())
  }

  /// Applies every transcript received so far and returns how many landed.
  ///
  /// Each transcript replaces the field's text. Events addressed to another
  /// field are dropped.
  pub fn pump_dictation(&mut self) -> usize {
    let Some(active) = self.active.as_mut() else {
      return 0;
    };

    let mut applied = 0;
    loop {
      match active.stream.try_recv() {
        Ok(event) if event.field != active.field => {
          tracing::warn!(
            target_field = %active.field,
            event_field = %event.field,
            "Discarding dictation event for inactive field"
          );
        }
        Ok(event) => match self.model.set_field(active.field, event.normalized_text()) {
          Ok(()) => applied += 1,
          Err(e) => tracing::warn!("Failed to apply dictated text: {}", e),
        },
        Err(TryRecvError::Empty) => break,
        Err(TryRecvError::Disconnected) => {
          tracing::debug!(field = %active.field, "Dictation stream closed by provider");
          break;
        }
      }
    }
    applied
  }

  /// Stops listening. Text already applied stays; pending transcripts are dropped.
  pub fn stop_dictation(&mut self) -> Option<InvoiceField> {
    let active = self.active.take()?;
    if let DictationCapability::Available(provider) = &mut self.dictation {
      provider.stop();
    }
    tracing::info!(field = %active.field, "Dictation stopped");
    Some(active.field)
  }
}

impl Drop for InvoiceSession {
  fn drop(&mut self) {
    self.stop_dictation();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::{DictationEvent, DictationProvider};
  use crate::infrastructure::dictation::ChannelDictationProvider;
  use std::sync::Arc;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use tokio::sync::mpsc;

  fn session_with_channel() -> (InvoiceSession, crate::infrastructure::dictation::DictationFeed) {
    let provider = ChannelDictationProvider::new();
    let feed = provider.feed();
    let session = InvoiceSession::new(
      InvoiceModel::default(),
      DictationCapability::available(provider),
    );
    (session, feed)
  }

  #[test]
  fn test_unavailable_capability_is_reported() {
    let mut session = InvoiceSession::new(InvoiceModel::default(), DictationCapability::Unavailable);
    let err = session.start_dictation(InvoiceField::Note).unwrap_err();
    assert!(matches!(err, InvoiceError::UnsupportedCapability(_)));
    assert_eq!(session.dictation_target(), None);
  }

  #[test]
  fn test_dictation_into_email_field() {
    let (mut session, feed) = session_with_channel();
    session.start_dictation(InvoiceField::ClientEmail).unwrap();

    assert!(feed.push("Sarah"));
    assert!(feed.push("Sarah Johnson @ Company . Com"));
    assert_eq!(session.pump_dictation(), 2);
    assert_eq!(
      session.model().state().client.email,
      "sarahjohnson@company.com"
    );
  }

  #[test]
  fn test_dictation_into_text_field_is_verbatim() {
    let (mut session, feed) = session_with_channel();
    session.start_dictation(InvoiceField::Note).unwrap();
    feed.push("Thank you for your business!");
    session.pump_dictation();
    assert_eq!(session.model().state().note, "Thank you for your business!");
  }

  #[test]
  fn test_second_target_is_rejected() {
    let (mut session, _feed) = session_with_channel();
    session.start_dictation(InvoiceField::FromName).unwrap();
    let err = session.start_dictation(InvoiceField::ClientName).unwrap_err();
    assert!(matches!(
      err,
      InvoiceError::DictationAlreadyActive {
        active: InvoiceField::FromName
      }
    ));
    assert_eq!(session.dictation_target(), Some(InvoiceField::FromName));
  }

  #[test]
  fn test_date_fields_cannot_be_dictated() {
    let (mut session, _feed) = session_with_channel();
    assert!(matches!(
      session.start_dictation(InvoiceField::DueDate),
      Err(InvoiceError::NotDictatable(InvoiceField::DueDate))
    ));
  }

  #[test]
  fn test_stop_keeps_last_applied_text() {
    let (mut session, feed) = session_with_channel();
    session.start_dictation(InvoiceField::ClientName).unwrap();
    feed.push("Sarah Johnson");
    session.pump_dictation();
    feed.push("Sarah Johnson and");

    assert_eq!(session.stop_dictation(), Some(InvoiceField::ClientName));
    assert_eq!(session.pump_dictation(), 0);
    assert!(!feed.push("ignored"));
    assert_eq!(session.model().state().client.name, "Sarah Johnson");

    session.start_dictation(InvoiceField::FromName).unwrap();
    assert_eq!(session.dictation_target(), Some(InvoiceField::FromName));
  }

  struct ScriptedProvider {
    events: Vec<DictationEvent>,
    stops: Arc<AtomicUsize>,
  }

  impl DictationProvider for ScriptedProvider {
    fn start(&mut self, _field: InvoiceField) -> Result<DictationStream, InvoiceError> {
      let (sender, receiver) = mpsc::unbounded_channel();
      for event in self.events.drain(..) {
        let _ = sender.send(event);
      }
      Ok(receiver)
    }

    fn stop(&mut self) {
      self.stops.fetch_add(1, Ordering::SeqCst);
    }
  }

  #[test]
  fn test_events_for_other_fields_are_discarded() {
    let stops = Arc::new(AtomicUsize::new(0));
    let provider = ScriptedProvider {
      events: vec![
        DictationEvent::new(InvoiceField::FromName, "John"),
        DictationEvent::new(InvoiceField::ClientName, "Sarah"),
      ],
      stops: stops.clone(),
    };
    let mut session = InvoiceSession::new(
      InvoiceModel::default(),
      DictationCapability::available(provider),
    );
    session.start_dictation(InvoiceField::ClientName).unwrap();
    assert_eq!(session.pump_dictation(), 1);
    assert_eq!(session.model().state().from.name, "");
    assert_eq!(session.model().state().client.name, "Sarah");
  }

  #[test]
  fn test_drop_releases_provider() {
    let stops = Arc::new(AtomicUsize::new(0));
    let provider = ScriptedProvider {
      events: Vec::new(),
      stops: stops.clone(),
    };
    {
      let mut session = InvoiceSession::new(
        InvoiceModel::default(),
        DictationCapability::available(provider),
      );
      session.start_dictation(InvoiceField::Note).unwrap();
    }
    assert_eq!(stops.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn test_preview_reflects_current_state() {
    let (mut session, _feed) = session_with_channel();
    session
      .model_mut()
      .set_currency(crate::domain::invoice::CurrencySelection::code("JPY"), None);
    session.model_mut().add_line_item();
    let preview = session.preview();
    assert_eq!(preview.rows.len(), 1);
    assert_eq!(preview.rows[0].amount, "¥0.00");
    assert_eq!(session.print_document().pages.len(), 1);
  }
}
