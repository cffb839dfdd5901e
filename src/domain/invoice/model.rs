use rust_decimal::Decimal;

use super::entities::{InvoiceState, InvoiceTotals, LineItem, LineItemPatch};
use super::errors::InvoiceError;
use super::value_objects::{
  Adjustment, AdjustmentKind, AdjustmentMode, CurrencySelection, InvoiceField, LineItemColumn,
  LineItemId, ensure_amount, format_date, parse_decimal, parse_optional_date, parse_quantity,
};

/// Owns the invoice being edited and keeps every derived figure consistent.
///
/// Every mutation is all-or-nothing: a rejected call leaves the state
/// untouched. Queries recompute from the current state on each call.
///
/// Rows are addressed by position. An index held across `remove_line_item`
/// may point at a different row afterwards; the `*_by_id` variants address
/// rows by their [`LineItemId`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceModel {
  state: InvoiceState,
}

impl InvoiceModel {
  pub fn new(state: InvoiceState) -> Self {
    Self { state }
  }

  /// Adopts externally supplied state, rejecting values the mutations would refuse.
  pub fn from_state(state: InvoiceState) -> Result<Self, InvoiceError> {
    state.validate()?;
    Ok(Self { state })
  }

  pub fn state(&self) -> &InvoiceState {
    &self.state
  }

  pub fn snapshot(&self) -> InvoiceState {
    self.state.clone()
  }

  pub fn set_field(&mut self, field: InvoiceField, value: impl Into<String>) -> Result<(), InvoiceError> {
    let value = value.into();
    let state = &mut self.state;
    match field {
      InvoiceField::FromName => state.from.name = value,
      InvoiceField::FromEmail => state.from.email = value,
      InvoiceField::FromAddress => state.from.address = value,
      InvoiceField::ClientName => state.client.name = value,
      InvoiceField::ClientEmail => state.client.email = value,
      InvoiceField::ClientAddress => state.client.address = value,
      InvoiceField::Note => state.note = value,
      InvoiceField::InvoiceNumber => state.invoice_number = value,
      InvoiceField::IssueDate => state.issue_date = parse_optional_date(&value)?,
      InvoiceField::DueDate => state.due_date = parse_optional_date(&value)?,
    }
    tracing::debug!(field = %field, "Invoice field updated");
    Ok(())
  }

  pub fn field(&self, field: InvoiceField) -> String {
    let state = &self.state;
    match field {
      InvoiceField::FromName => state.from.name.clone(),
      InvoiceField::FromEmail => state.from.email.clone(),
      InvoiceField::FromAddress => state.from.address.clone(),
      InvoiceField::ClientName => state.client.name.clone(),
      InvoiceField::ClientEmail => state.client.email.clone(),
      InvoiceField::ClientAddress => state.client.address.clone(),
      InvoiceField::Note => state.note.clone(),
      InvoiceField::InvoiceNumber => state.invoice_number.clone(),
      InvoiceField::IssueDate => format_date(state.issue_date),
      InvoiceField::DueDate => format_date(state.due_date),
    }
  }

  pub fn line_items(&self) -> &[LineItem] {
    &self.state.items
  }

  pub fn line_item(&self, index: usize) -> Result<&LineItem, InvoiceError> {
    self.state.items.get(index).ok_or(InvoiceError::IndexOutOfRange {
      index,
      len: self.state.items.len(),
    })
  }

  pub fn line_item_index(&self, id: LineItemId) -> Result<usize, InvoiceError> {
    self
      .state
      .items
      .iter()
      .position(|item| item.id() == id)
      .ok_or(InvoiceError::LineItemNotFound(id.value()))
  }

  pub fn set_line_item(&mut self, index: usize, patch: LineItemPatch) -> Result<(), InvoiceError> {
    patch.validate()?;
    let len = self.state.items.len();
    let item = self
      .state
      .items
      .get_mut(index)
      .ok_or(InvoiceError::IndexOutOfRange { index, len })?;
    item.apply(patch)?;
    tracing::debug!(index, amount = %item.amount(), "Line item updated");
    Ok(())
  }

  pub fn set_line_item_by_id(&mut self, id: LineItemId, patch: LineItemPatch) -> Result<(), InvoiceError> {
    let index = self.line_item_index(id)?;
    self.set_line_item(index, patch)
  }

  /// Form-style input for one cell of a row.
  pub fn set_line_item_input(
    &mut self,
    index: usize,
    column: LineItemColumn,
    raw: &str,
  ) -> Result<(), InvoiceError> {
    let patch = match column {
      LineItemColumn::Name => LineItemPatch::default().name(raw),
      LineItemColumn::Quantity => LineItemPatch::default().quantity(parse_quantity(raw)?),
      LineItemColumn::UnitPrice => LineItemPatch::default().unit_price(parse_decimal(raw)?),
    };
    self.set_line_item(index, patch)
  }

  pub fn add_line_item(&mut self) -> LineItemId {
    let item = LineItem::default();
    let id = item.id();
    self.state.items.push(item);
    tracing::debug!(count = self.state.items.len(), "Line item added");
    id
  }

  pub fn remove_line_item(&mut self, index: usize) -> Result<LineItem, InvoiceError> {
    let len = self.state.items.len();
    if index >= len {
      return Err(InvoiceError::IndexOutOfRange { index, len });
    }
    let removed = self.state.items.remove(index);
    tracing::debug!(index, count = self.state.items.len(), "Line item removed");
    Ok(removed)
  }

  pub fn remove_line_item_by_id(&mut self, id: LineItemId) -> Result<LineItem, InvoiceError> {
    let index = self.line_item_index(id)?;
    self.remove_line_item(index)
  }

  /// `custom_symbol` is stored only together with the custom selection. A
  /// registry code hides the stored custom symbol without clearing it.
  pub fn set_currency(&mut self, selection: CurrencySelection, custom_symbol: Option<String>) {
    match custom_symbol {
      Some(symbol) if selection.is_custom() => self.state.custom_currency_symbol = symbol,
      Some(_) => tracing::debug!(currency = %selection, "Ignoring custom symbol for registry currency"),
      None => {}
    }
    tracing::debug!(currency = %selection, "Currency changed");
    self.state.currency = selection;
  }

  pub fn set_adjustment(&mut self, kind: AdjustmentKind, adjustment: Adjustment) -> Result<(), InvoiceError> {
    adjustment.validate()?;
    match kind {
      AdjustmentKind::Tax => self.state.tax = adjustment,
      AdjustmentKind::Discount => self.state.discount = adjustment,
    }
    tracing::debug!(
      kind = kind.label(),
      mode = adjustment.mode.as_str(),
      value = %adjustment.value,
      "Adjustment updated"
    );
    Ok(())
  }

  pub fn set_adjustment_input(
    &mut self,
    kind: AdjustmentKind,
    mode: AdjustmentMode,
    raw: &str,
  ) -> Result<(), InvoiceError> {
    let adjustment = Adjustment::new(mode, parse_decimal(raw)?)?;
    self.set_adjustment(kind, adjustment)
  }

  pub fn adjustment(&self, kind: AdjustmentKind) -> Adjustment {
    match kind {
      AdjustmentKind::Tax => self.state.tax,
      AdjustmentKind::Discount => self.state.discount,
    }
  }

  pub fn set_shipping(&mut self, amount: Decimal) -> Result<(), InvoiceError> {
    self.state.shipping = ensure_amount(amount, "Shipping")?;
    tracing::debug!(shipping = %amount, "Shipping updated");
    Ok(())
  }

  pub fn set_shipping_input(&mut self, raw: &str) -> Result<(), InvoiceError> {
    self.set_shipping(parse_decimal(raw)?)
  }

  pub fn subtotal(&self) -> Decimal {
    self.state.subtotal()
  }

  pub fn tax_amount(&self) -> Decimal {
    self.state.tax_amount()
  }

  pub fn discount_amount(&self) -> Decimal {
    self.state.discount_amount()
  }

  pub fn grand_total(&self) -> Decimal {
    self.state.grand_total()
  }

  pub fn totals(&self) -> InvoiceTotals {
    InvoiceTotals::calculate(&self.state)
  }

  pub fn currency_symbol(&self) -> &str {
    self.state.currency_symbol()
  }
}

impl Default for InvoiceModel {
  fn default() -> Self {
    Self::new(InvoiceState::default())
  }
}
