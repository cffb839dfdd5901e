use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),
  #[error("Invalid date: {0}")]
  InvalidDate(String),
  #[error("Invalid adjustment mode: {0}")]
  InvalidAdjustmentMode(String),
  #[error("Unknown field: {0}")]
  UnknownField(String),
  #[error("Invalid currency: {0}")]
  InvalidCurrency(String),
}

/// Parses a decimal typed into a numeric form field.
pub fn parse_decimal(raw: &str) -> Result<Decimal, ValueObjectError> {
  let trimmed = raw.trim();
  Decimal::from_str(trimmed)
    .map_err(|_| ValueObjectError::InvalidAmount(format!("'{}' is not a number", raw)))
}

/// Largest unit price, line amount, shipping or flat adjustment accepted.
///
/// Together with [`MAX_PERCENT`] this keeps every total far inside the
/// range `Decimal` arithmetic can represent.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Largest percentage accepted for tax or discount.
pub const MAX_PERCENT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

pub fn ensure_at_most(value: Decimal, limit: Decimal, what: &str) -> Result<Decimal, ValueObjectError> {
  if value > limit {
    return Err(ValueObjectError::InvalidAmount(format!(
      "{} cannot exceed {}",
      what, limit
    )));
  }
  Ok(value)
}

/// A non-negative money figure no larger than [`MAX_AMOUNT`].
pub fn ensure_amount(value: Decimal, what: &str) -> Result<Decimal, ValueObjectError> {
  ensure_non_negative(value, what)?;
  ensure_at_most(value, MAX_AMOUNT, what)
}

pub fn ensure_non_negative(value: Decimal, what: &str) -> Result<Decimal, ValueObjectError> {
  if value.is_sign_negative() && !value.is_zero() {
    return Err(ValueObjectError::InvalidAmount(format!(
      "{} cannot be negative",
      what
    )));
  }
  Ok(value)
}

pub fn parse_quantity(raw: &str) -> Result<u32, ValueObjectError> {
  let trimmed = raw.trim();
  if trimmed.starts_with('-') {
    return Err(ValueObjectError::InvalidQuantity(
      "Quantity cannot be negative".to_string(),
    ));
  }
  trimmed
    .parse::<u32>()
    .map_err(|_| ValueObjectError::InvalidQuantity(format!("'{}' is not a whole number", raw)))
}

/// Empty input clears the date.
pub fn parse_optional_date(raw: &str) -> Result<Option<NaiveDate>, ValueObjectError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }
  NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
    .map(Some)
    .map_err(|_| ValueObjectError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", raw)))
}

/// Inverse of [`parse_optional_date`]: a missing date is the empty string.
pub fn format_date(date: Option<NaiveDate>) -> String {
  date
    .map(|d| d.format("%Y-%m-%d").to_string())
    .unwrap_or_default()
}

// Line Item Id - stable handle that survives removals of other rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(Uuid);

impl LineItemId {
  pub fn new() -> Self {
    Self(Uuid::new_v4())
  }

  pub fn value(&self) -> Uuid {
    self.0
  }
}

impl Default for LineItemId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for LineItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Adjustment Mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AdjustmentMode {
  #[default]
  #[serde(rename = "percent")]
  Percentage,
  #[serde(rename = "amount")]
  FixedAmount,
}

impl AdjustmentMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      AdjustmentMode::Percentage => "percent",
      AdjustmentMode::FixedAmount => "amount",
    }
  }
}

impl FromStr for AdjustmentMode {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "percent" | "percentage" => Ok(AdjustmentMode::Percentage),
      "amount" | "fixed" => Ok(AdjustmentMode::FixedAmount),
      _ => Err(ValueObjectError::InvalidAdjustmentMode(format!(
        "Unknown adjustment mode: {}",
        s
      ))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
  Tax,
  Discount,
}

impl AdjustmentKind {
  pub fn label(&self) -> &'static str {
    match self {
      AdjustmentKind::Tax => "Tax",
      AdjustmentKind::Discount => "Discount",
    }
  }
}

/// Tax or discount, either a percentage of the subtotal or a flat amount.
///
/// Changing `mode` keeps `value` as is: 10 percent becomes a flat 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Adjustment {
  #[serde(rename = "type")]
  pub mode: AdjustmentMode,
  pub value: Decimal,
}

impl Adjustment {
  pub fn new(mode: AdjustmentMode, value: Decimal) -> Result<Self, ValueObjectError> {
    let adjustment = Self { mode, value };
    adjustment.validate()?;
    Ok(adjustment)
  }

  pub fn percentage(value: Decimal) -> Result<Self, ValueObjectError> {
    Self::new(AdjustmentMode::Percentage, value)
  }

  pub fn fixed(value: Decimal) -> Result<Self, ValueObjectError> {
    Self::new(AdjustmentMode::FixedAmount, value)
  }

  pub fn with_mode(self, mode: AdjustmentMode) -> Self {
    Self { mode, ..self }
  }

  pub fn validate(&self) -> Result<(), ValueObjectError> {
    ensure_non_negative(self.value, "Adjustment value")?;
    let limit = match self.mode {
      AdjustmentMode::Percentage => MAX_PERCENT,
      AdjustmentMode::FixedAmount => MAX_AMOUNT,
    };
    ensure_at_most(self.value, limit, "Adjustment value").map(|_| ())
  }

  pub fn effective_amount(&self, subtotal: Decimal) -> Decimal {
    match self.mode {
      AdjustmentMode::Percentage => subtotal * self.value / Decimal::ONE_HUNDRED,
      AdjustmentMode::FixedAmount => self.value,
    }
  }

  pub fn is_set(&self) -> bool {
    self.value > Decimal::ZERO
  }
}

pub const CUSTOM_CURRENCY: &str = "custom";

// Currency Selection - a registry code or the custom sentinel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CurrencySelection {
  Registry(String),
  Custom,
}

impl CurrencySelection {
  pub fn code(code: &str) -> Self {
    CurrencySelection::Registry(code.to_string())
  }

  pub fn is_custom(&self) -> bool {
    matches!(self, CurrencySelection::Custom)
  }
}

impl Default for CurrencySelection {
  fn default() -> Self {
    CurrencySelection::Registry("USD".to_string())
  }
}

impl FromStr for CurrencySelection {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidCurrency(
        "Currency cannot be empty".to_string(),
      ));
    }
    if trimmed == CUSTOM_CURRENCY {
      return Ok(CurrencySelection::Custom);
    }
    Ok(CurrencySelection::Registry(trimmed.to_string()))
  }
}

impl TryFrom<String> for CurrencySelection {
  type Error = ValueObjectError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<CurrencySelection> for String {
  fn from(value: CurrencySelection) -> Self {
    value.to_string()
  }
}

impl fmt::Display for CurrencySelection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CurrencySelection::Registry(code) => write!(f, "{}", code),
      CurrencySelection::Custom => write!(f, "{}", CUSTOM_CURRENCY),
    }
  }
}

// Invoice Field - scalar top-level attributes addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvoiceField {
  FromName,
  FromEmail,
  FromAddress,
  ClientName,
  ClientEmail,
  ClientAddress,
  Note,
  #[serde(rename = "date")]
  IssueDate,
  DueDate,
  InvoiceNumber,
}

impl InvoiceField {
  pub const ALL: [InvoiceField; 10] = [
    InvoiceField::FromName,
    InvoiceField::FromEmail,
    InvoiceField::FromAddress,
    InvoiceField::ClientName,
    InvoiceField::ClientEmail,
    InvoiceField::ClientAddress,
    InvoiceField::Note,
    InvoiceField::IssueDate,
    InvoiceField::DueDate,
    InvoiceField::InvoiceNumber,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceField::FromName => "fromName",
      InvoiceField::FromEmail => "fromEmail",
      InvoiceField::FromAddress => "fromAddress",
      InvoiceField::ClientName => "clientName",
      InvoiceField::ClientEmail => "clientEmail",
      InvoiceField::ClientAddress => "clientAddress",
      InvoiceField::Note => "note",
      InvoiceField::IssueDate => "date",
      InvoiceField::DueDate => "dueDate",
      InvoiceField::InvoiceNumber => "invoiceNumber",
    }
  }

  pub fn is_email(&self) -> bool {
    matches!(self, InvoiceField::FromEmail | InvoiceField::ClientEmail)
  }

  pub fn is_date(&self) -> bool {
    matches!(self, InvoiceField::IssueDate | InvoiceField::DueDate)
  }

  /// Dates are picked, not spoken.
  pub fn accepts_dictation(&self) -> bool {
    !self.is_date()
  }
}

impl FromStr for InvoiceField {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    InvoiceField::ALL
      .into_iter()
      .find(|field| field.as_str() == s)
      .ok_or_else(|| ValueObjectError::UnknownField(s.to_string()))
  }
}

impl fmt::Display for InvoiceField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Line Item Column - editable cells of a line item row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemColumn {
  Name,
  Quantity,
  UnitPrice,
}
