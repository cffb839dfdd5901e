use chrono::{Days, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency;
use super::value_objects::{
  Adjustment, CurrencySelection, LineItemId, MAX_AMOUNT, ValueObjectError, ensure_amount,
  ensure_at_most,
};

// Party - sender or client identity block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Party {
  pub name: String,
  pub email: String,
  pub address: String,
}

impl Party {
  pub fn new(name: &str, email: &str, address: &str) -> Self {
    Self {
      name: name.to_string(),
      email: email.to_string(),
      address: address.to_string(),
    }
  }
}

/// Partial update for a line item. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItemPatch {
  pub name: Option<String>,
  pub quantity: Option<u32>,
  pub unit_price: Option<Decimal>,
}

impl LineItemPatch {
  pub fn name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  pub fn quantity(mut self, quantity: u32) -> Self {
    self.quantity = Some(quantity);
    self
  }

  pub fn unit_price(mut self, unit_price: Decimal) -> Self {
    self.unit_price = Some(unit_price);
    self
  }

  pub fn validate(&self) -> Result<(), ValueObjectError> {
    if let Some(price) = self.unit_price {
      ensure_amount(price, "Unit price")?;
    }
    Ok(())
  }

  fn touches_amount(&self) -> bool {
    self.quantity.is_some() || self.unit_price.is_some()
  }
}

#[derive(Debug, Deserialize)]
struct LineItemRecord {
  #[serde(default)]
  id: LineItemId,
  #[serde(default)]
  name: String,
  quantity: u32,
  #[serde(alias = "price")]
  unit_price: Decimal,
}

// Line Item - amount is always derived from quantity and unit price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LineItemRecord")]
pub struct LineItem {
  id: LineItemId,
  name: String,
  quantity: u32,
  unit_price: Decimal,
  amount: Decimal,
}

impl LineItem {
  pub fn new(name: &str, quantity: u32, unit_price: Decimal) -> Result<Self, ValueObjectError> {
    let unit_price = ensure_amount(unit_price, "Unit price")?;
    Ok(Self {
      id: LineItemId::new(),
      name: name.to_string(),
      quantity,
      unit_price,
      amount: line_amount(quantity, unit_price)?,
    })
  }

  pub fn id(&self) -> LineItemId {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn quantity(&self) -> u32 {
    self.quantity
  }

  pub fn unit_price(&self) -> Decimal {
    self.unit_price
  }

  pub fn amount(&self) -> Decimal {
    self.amount
  }

  /// Applies a validated patch. The row is left unchanged when the new
  /// amount would exceed [`MAX_AMOUNT`].
  pub(crate) fn apply(&mut self, patch: LineItemPatch) -> Result<(), ValueObjectError> {
    if patch.touches_amount() {
      let quantity = patch.quantity.unwrap_or(self.quantity);
      let unit_price = patch.unit_price.unwrap_or(self.unit_price);
      self.amount = line_amount(quantity, unit_price)?;
      self.quantity = quantity;
      self.unit_price = unit_price;
    }
    if let Some(name) = patch.name {
      self.name = name;
    }
    Ok(())
  }
}

fn line_amount(quantity: u32, unit_price: Decimal) -> Result<Decimal, ValueObjectError> {
  let amount = Decimal::from(quantity)
    .checked_mul(unit_price)
    .ok_or_else(|| ValueObjectError::InvalidAmount("Line amount is out of range".to_string()))?;
  ensure_at_most(amount, MAX_AMOUNT, "Line amount")
}

impl Default for LineItem {
  fn default() -> Self {
    Self {
      id: LineItemId::new(),
      name: String::new(),
      quantity: 1,
      unit_price: Decimal::ZERO,
      amount: Decimal::ZERO,
    }
  }
}

impl TryFrom<LineItemRecord> for LineItem {
  type Error = ValueObjectError;

  fn try_from(record: LineItemRecord) -> Result<Self, Self::Error> {
    let mut item = LineItem::new(&record.name, record.quantity, record.unit_price)?;
    item.id = record.id;
    Ok(item)
  }
}

/// Values a fresh invoice starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDefaults {
  pub number_prefix: String,
  pub payment_days: u32,
  pub currency: CurrencySelection,
}

impl Default for InvoiceDefaults {
  fn default() -> Self {
    Self {
      number_prefix: "INV-".to_string(),
      payment_days: 30,
      currency: CurrencySelection::default(),
    }
  }
}

// Invoice State - the aggregate root edited by a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceState {
  pub from: Party,
  pub client: Party,
  pub items: Vec<LineItem>,
  pub note: String,
  pub issue_date: Option<NaiveDate>,
  pub due_date: Option<NaiveDate>,
  pub invoice_number: String,
  pub currency: CurrencySelection,
  pub custom_currency_symbol: String,
  pub tax: Adjustment,
  pub discount: Adjustment,
  pub shipping: Decimal,
}

impl InvoiceState {
  /// Blank form: one empty row, dated `today`, due after the payment window.
  pub fn new(defaults: &InvoiceDefaults, today: NaiveDate) -> Result<Self, ValueObjectError> {
    let due_date = today
      .checked_add_days(Days::new(u64::from(defaults.payment_days)))
      .ok_or_else(|| {
        ValueObjectError::InvalidDate(format!(
          "{} payment days after {} is out of range",
          defaults.payment_days, today
        ))
      })?;
    let number = rand::thread_rng().gen_range(0..10_000);
    Ok(Self {
      items: vec![LineItem::default()],
      issue_date: Some(today),
      due_date: Some(due_date),
      invoice_number: format!("{}{}", defaults.number_prefix, number),
      currency: defaults.currency.clone(),
      ..Self::default()
    })
  }

  pub fn subtotal(&self) -> Decimal {
    self.items.iter().map(LineItem::amount).sum()
  }

  pub fn tax_amount(&self) -> Decimal {
    self.tax.effective_amount(self.subtotal())
  }

  pub fn discount_amount(&self) -> Decimal {
    self.discount.effective_amount(self.subtotal())
  }

  /// Not clamped: a large discount drives the total below zero.
  pub fn grand_total(&self) -> Decimal {
    self.subtotal() + self.tax_amount() - self.discount_amount() + self.shipping
  }

  pub fn currency_symbol(&self) -> &str {
    currency::resolve_symbol(&self.currency, &self.custom_currency_symbol)
  }

  pub fn validate(&self) -> Result<(), ValueObjectError> {
    self.tax.validate()?;
    self.discount.validate()?;
    ensure_amount(self.shipping, "Shipping")?;
    Ok(())
  }
}

// Invoice Totals - calculated, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceTotals {
  pub subtotal: Decimal,
  pub tax: Decimal,
  pub discount: Decimal,
  pub shipping: Decimal,
  pub grand_total: Decimal,
}

impl InvoiceTotals {
  pub fn calculate(state: &InvoiceState) -> Self {
    let subtotal = state.subtotal();
    let tax = state.tax.effective_amount(subtotal);
    let discount = state.discount.effective_amount(subtotal);

    Self {
      subtotal,
      tax,
      discount,
      shipping: state.shipping,
      grand_total: subtotal + tax - discount + state.shipping,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::value_objects::AdjustmentMode;
  use rust_decimal_macros::dec;

  fn sample_state() -> InvoiceState {
    InvoiceState {
      items: vec![
        LineItem::new("Web Design", 1, dec!(1500)).unwrap(),
        LineItem::new("Logo Design", 1, dec!(500)).unwrap(),
        LineItem::new("Hosting (Monthly)", 12, dec!(25)).unwrap(),
      ],
      tax: Adjustment::percentage(dec!(10)).unwrap(),
      discount: Adjustment::percentage(dec!(5)).unwrap(),
      shipping: dec!(25),
      ..InvoiceState::default()
    }
  }

  #[test]
  fn test_line_item_amount() {
    let item = LineItem::new("Hosting", 12, dec!(25)).unwrap();
    assert_eq!(item.amount(), dec!(300));
    assert!(LineItem::new("Refund", 1, dec!(-5)).is_err());
  }

  #[test]
  fn test_default_line_item() {
    let item = LineItem::default();
    assert_eq!(item.name(), "");
    assert_eq!(item.quantity(), 1);
    assert_eq!(item.unit_price(), Decimal::ZERO);
    assert_eq!(item.amount(), Decimal::ZERO);
  }

  #[test]
  fn test_apply_name_only_keeps_amount() {
    let mut item = LineItem::new("Hosting", 12, dec!(25)).unwrap();
    item.apply(LineItemPatch::default().name("Hosting (Yearly)")).unwrap();
    assert_eq!(item.name(), "Hosting (Yearly)");
    assert_eq!(item.amount(), dec!(300));
  }

  #[test]
  fn test_line_item_deserialization_recomputes_amount() {
    let json = r#"{"name":"Logo","quantity":3,"price":"20.5","amount":"1"}"#;
    let item: LineItem = serde_json::from_str(json).unwrap();
    assert_eq!(item.amount(), dec!(61.5));

    let negative = r#"{"name":"Logo","quantity":1,"unit_price":"-2"}"#;
    assert!(serde_json::from_str::<LineItem>(negative).is_err());
  }

  #[test]
  fn test_totals_scenario() {
    let totals = InvoiceTotals::calculate(&sample_state());
    assert_eq!(totals.subtotal, dec!(2300));
    assert_eq!(totals.tax, dec!(230));
    assert_eq!(totals.discount, dec!(115));
    assert_eq!(totals.grand_total, dec!(2440));
  }

  #[test]
  fn test_empty_invoice_totals() {
    let state = InvoiceState::default();
    assert_eq!(state.subtotal(), Decimal::ZERO);
    assert_eq!(state.grand_total(), Decimal::ZERO);
  }

  #[test]
  fn test_grand_total_can_go_negative() {
    let state = InvoiceState {
      items: vec![LineItem::new("Consulting", 1, dec!(100)).unwrap()],
      discount: Adjustment::fixed(dec!(150)).unwrap(),
      ..InvoiceState::default()
    };
    assert_eq!(state.grand_total(), dec!(-50));
  }

  #[test]
  fn test_mode_switch_reinterprets_value() {
    let mut state = sample_state();
    state.tax = state.tax.with_mode(AdjustmentMode::FixedAmount);
    assert_eq!(state.tax_amount(), dec!(10));
  }

  #[test]
  fn test_new_invoice_defaults() {
    let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
    let state = InvoiceState::new(&InvoiceDefaults::default(), today).unwrap();

    assert_eq!(state.items.len(), 1);
    assert_eq!(state.issue_date, Some(today));
    assert_eq!(state.due_date, NaiveDate::from_ymd_opt(2026, 3, 3));
    assert!(state.invoice_number.starts_with("INV-"));
    assert_eq!(state.currency_symbol(), "$");
    assert_eq!(state.tax.mode, AdjustmentMode::Percentage);
    assert_eq!(state.shipping, Decimal::ZERO);
  }

  #[test]
  fn test_line_amount_out_of_range_is_rejected() {
    let huge = crate::domain::invoice::value_objects::parse_decimal("79228162514264337593543950335").unwrap();
    assert!(matches!(
      LineItem::new("Gold", 1, huge),
      Err(ValueObjectError::InvalidAmount(_))
    ));

    let mut item = LineItem::new("Gold", 1, MAX_AMOUNT).unwrap();
    let err = item.apply(LineItemPatch::default().quantity(2).name("Bullion")).unwrap_err();
    assert!(matches!(err, ValueObjectError::InvalidAmount(_)));
    assert_eq!(item.quantity(), 1);
    assert_eq!(item.name(), "Gold");
    assert_eq!(item.amount(), MAX_AMOUNT);
  }

  #[test]
  fn test_totals_at_the_limits_do_not_overflow() {
    let state = InvoiceState {
      items: (0..1_000)
        .map(|_| LineItem::new("Gold", 1, MAX_AMOUNT).unwrap())
        .collect(),
      tax: Adjustment::percentage(crate::domain::invoice::value_objects::MAX_PERCENT).unwrap(),
      shipping: MAX_AMOUNT,
      ..InvoiceState::default()
    };
    let totals = InvoiceTotals::calculate(&state);
    assert_eq!(totals.subtotal, MAX_AMOUNT * dec!(1000));
    assert_eq!(totals.tax, totals.subtotal * dec!(10000));
    assert!(state.grand_total() > totals.tax);
  }

  #[test]
  fn test_payment_window_out_of_range_is_an_error() {
    let defaults = InvoiceDefaults {
      payment_days: u32::MAX,
      ..InvoiceDefaults::default()
    };
    let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
    assert!(matches!(
      InvoiceState::new(&defaults, today),
      Err(ValueObjectError::InvalidDate(_))
    ));
  }
}
