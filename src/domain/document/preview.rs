use serde::Serialize;
use std::fmt::Write;

use super::format::{SignStyle, TotalsLine, format_money, totals_lines};
use crate::domain::invoice::{InvoiceState, Party, format_date};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyBlock {
  pub heading: String,
  pub name: String,
  pub address: String,
  pub email: String,
}

impl PartyBlock {
  fn new(heading: &str, party: &Party) -> Self {
    Self {
      heading: heading.to_string(),
      name: party.name.clone(),
      address: party.address.clone(),
      email: party.email.clone(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRow {
  pub name: String,
  pub quantity: String,
  pub unit_price: String,
  pub amount: String,
}

/// On-screen representation of an invoice, every figure already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoicePreview {
  pub title: String,
  pub invoice_number: String,
  pub issue_date: String,
  pub due_date: String,
  pub from: PartyBlock,
  pub bill_to: PartyBlock,
  pub rows: Vec<PreviewRow>,
  pub totals: Vec<TotalsLine>,
  pub note: Option<String>,
}

impl InvoicePreview {
  pub fn render(state: &InvoiceState, symbol: &str) -> Self {
    let rows = state
      .items
      .iter()
      .map(|item| PreviewRow {
        name: item.name().to_string(),
        quantity: item.quantity().to_string(),
        unit_price: format_money(symbol, item.unit_price()),
        amount: format_money(symbol, item.amount()),
      })
      .collect();

    Self {
      title: "INVOICE".to_string(),
      invoice_number: state.invoice_number.clone(),
      issue_date: format_date(state.issue_date),
      due_date: format_date(state.due_date),
      from: PartyBlock::new("From:", &state.from),
      bill_to: PartyBlock::new("Billed To:", &state.client),
      rows,
      totals: totals_lines(state, symbol, SignStyle::Explicit),
      note: (!state.note.is_empty()).then(|| state.note.clone()),
    }
  }

  /// Plain-text rendition for terminals and logs.
  pub fn to_text(&self) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", self.title);
    let _ = writeln!(out, "Date: {}", self.issue_date);
    let _ = writeln!(out, "Due Date: {}", self.due_date);
    let _ = writeln!(out, "Invoice #: {}", self.invoice_number);
    let _ = writeln!(out);

    for block in [&self.from, &self.bill_to] {
      let _ = writeln!(out, "{}", block.heading);
      let _ = writeln!(out, "  {}", block.name);
      let _ = writeln!(out, "  {}", block.address);
      let _ = writeln!(out, "  {}", block.email);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{:<30} {:>8} {:>14} {:>14}", "Item", "Quantity", "Price", "Amount");
    for row in &self.rows {
      let _ = writeln!(
        out,
        "{:<30} {:>8} {:>14} {:>14}",
        row.name, row.quantity, row.unit_price, row.amount
      );
    }
    let _ = writeln!(out);

    for line in &self.totals {
      let _ = writeln!(out, "{:>54} {:>14}", format!("{}:", line.label), line.value);
    }

    if let Some(note) = &self.note {
      let _ = writeln!(out);
      let _ = writeln!(out, "Note:");
      let _ = writeln!(out, "{}", note);
    }
    out
  }
}
