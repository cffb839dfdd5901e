use serde::{Deserialize, Serialize};

use super::value_objects::InvoiceField;

/// Full transcript recognised so far for the target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictationEvent {
  pub field: InvoiceField,
  pub text: String,
}

impl DictationEvent {
  pub fn new(field: InvoiceField, text: impl Into<String>) -> Self {
    Self {
      field,
      text: text.into(),
    }
  }

  /// Text as it should land in the field.
  pub fn normalized_text(&self) -> String {
    normalize_dictated_text(self.field, &self.text)
  }
}

/// Spoken email addresses come back with spaces and capitals.
pub fn normalize_dictated_text(field: InvoiceField, text: &str) -> String {
  if field.is_email() {
    text
      .chars()
      .filter(|c| !c.is_whitespace())
      .flat_map(char::to_lowercase)
      .collect()
  } else {
    text.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_email_fields_are_normalized() {
    let event = DictationEvent::new(InvoiceField::ClientEmail, "Sarah Johnson @ Company . Com");
    assert_eq!(event.normalized_text(), "sarahjohnson@company.com");
  }

  #[test]
  fn test_other_fields_are_verbatim() {
    let event = DictationEvent::new(InvoiceField::ClientName, "Sarah Johnson");
    assert_eq!(event.normalized_text(), "Sarah Johnson");
  }

  #[test]
  fn test_email_strips_tabs_and_newlines() {
    assert_eq!(
      normalize_dictated_text(InvoiceField::FromEmail, "John\t.Smith\n@Example.com"),
      "john.smith@example.com"
    );
  }
}
