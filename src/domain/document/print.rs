use serde::Serialize;

use super::format::{SignStyle, format_money, totals_lines};
use super::preview::InvoicePreview;
use crate::domain::invoice::InvoiceState;

// A4 template, millimetres
pub const PAGE_WIDTH: u32 = 210;
pub const PAGE_HEIGHT: u32 = 297;
const PAGE_BOTTOM: u32 = 280;
const TOP_MARGIN: u32 = 20;
const LEFT_COLUMN: u32 = 20;
const RIGHT_COLUMN: u32 = 120;
const TABLE_RIGHT: u32 = 190;
const QTY_COLUMN: u32 = 100;
const PRICE_COLUMN: u32 = 130;
const AMOUNT_COLUMN: u32 = 160;
const TOTALS_COLUMN: u32 = 130;
const TABLE_TOP: u32 = 130;
const LINE_HEIGHT: u32 = 10;

const TITLE_SIZE: u8 = 24;
const BODY_SIZE: u8 = 12;
const TOTAL_SIZE: u8 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
  Left,
  Center,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PrintElement {
  Text {
    x: u32,
    y: u32,
    size: u8,
    align: Align,
    text: String,
  },
  Rule {
    x1: u32,
    x2: u32,
    y: u32,
  },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrintPage {
  pub elements: Vec<PrintElement>,
}

impl PrintPage {
  fn text(&mut self, x: u32, y: u32, size: u8, text: impl Into<String>) {
    self.elements.push(PrintElement::Text {
      x,
      y,
      size,
      align: Align::Left,
      text: text.into(),
    });
  }

  fn rule(&mut self, y: u32) {
    self.elements.push(PrintElement::Rule {
      x1: LEFT_COLUMN,
      x2: TABLE_RIGHT,
      y,
    });
  }

  fn table_header(&mut self, top: u32) {
    self.rule(top);
    self.text(LEFT_COLUMN, top + 10, BODY_SIZE, "Item");
    self.text(QTY_COLUMN, top + 10, BODY_SIZE, "Qty");
    self.text(PRICE_COLUMN, top + 10, BODY_SIZE, "Price");
    self.text(AMOUNT_COLUMN, top + 10, BODY_SIZE, "Amount");
    self.rule(top + 15);
  }
}

/// Print-ready layout: header, identity blocks, item table, totals, note.
///
/// Rows that would cross the bottom margin continue on a new page that
/// repeats the table header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintDocument {
  pub invoice_number: String,
  pub width: u32,
  pub height: u32,
  pub pages: Vec<PrintPage>,
}

impl PrintDocument {
  pub fn render(state: &InvoiceState, symbol: &str) -> Self {
    let preview = InvoicePreview::render(state, symbol);
    let mut pages = Vec::new();
    let mut page = PrintPage::default();

    page.elements.push(PrintElement::Text {
      x: PAGE_WIDTH / 2,
      y: TOP_MARGIN,
      size: TITLE_SIZE,
      align: Align::Center,
      text: preview.title.clone(),
    });

    page.text(LEFT_COLUMN, 40, BODY_SIZE, format!("Invoice #: {}", preview.invoice_number));
    page.text(LEFT_COLUMN, 50, BODY_SIZE, format!("Date: {}", preview.issue_date));
    page.text(LEFT_COLUMN, 60, BODY_SIZE, format!("Due Date: {}", preview.due_date));

    for (x, block) in [(LEFT_COLUMN, &preview.from), (RIGHT_COLUMN, &preview.bill_to)] {
      page.text(x, 80, BODY_SIZE, block.heading.clone());
      page.text(x, 90, BODY_SIZE, block.name.clone());
      page.text(x, 100, BODY_SIZE, block.address.clone());
      page.text(x, 110, BODY_SIZE, block.email.clone());
    }

    page.table_header(TABLE_TOP);
    let mut y = TABLE_TOP + 25;

    for item in &state.items {
      if y > PAGE_BOTTOM {
        pages.push(std::mem::take(&mut page));
        page.table_header(TOP_MARGIN);
        y = TOP_MARGIN + 25;
      }
      page.text(LEFT_COLUMN, y, BODY_SIZE, item.name());
      page.text(QTY_COLUMN, y, BODY_SIZE, item.quantity().to_string());
      page.text(PRICE_COLUMN, y, BODY_SIZE, format_money(symbol, item.unit_price()));
      page.text(AMOUNT_COLUMN, y, BODY_SIZE, format_money(symbol, item.amount()));
      y += LINE_HEIGHT;
    }
    page.rule(y + 5);

    let totals = totals_lines(state, symbol, SignStyle::Plain);
    let note_height = if preview.note.is_some() { 35 } else { 0 };
    let block_height = (totals.len() as u32 - 1) * LINE_HEIGHT + note_height;
    y += 15;
    if y + block_height > PAGE_BOTTOM {
      pages.push(std::mem::take(&mut page));
      y = TOP_MARGIN;
    }

    if let Some((total_line, lines)) = totals.split_last() {
      for line in lines {
        page.text(TOTALS_COLUMN, y, BODY_SIZE, format!("{}: {}", line.label, line.value));
        y += LINE_HEIGHT;
      }
      page.text(
        TOTALS_COLUMN,
        y,
        TOTAL_SIZE,
        format!("{}: {}", total_line.label, total_line.value),
      );
    }

    if let Some(note) = &preview.note {
      page.text(LEFT_COLUMN, y + 25, BODY_SIZE, "Note:");
      page.text(LEFT_COLUMN, y + 35, BODY_SIZE, note.clone());
    }
    pages.push(page);

    Self {
      invoice_number: preview.invoice_number,
      width: PAGE_WIDTH,
      height: PAGE_HEIGHT,
      pages,
    }
  }

  /// Text content in print order, one entry per text element.
  pub fn texts(&self) -> impl Iterator<Item = &str> {
    self.pages.iter().flat_map(|page| {
      page.elements.iter().filter_map(|element| match element {
        PrintElement::Text { text, .. } => Some(text.as_str()),
        PrintElement::Rule { .. } => None,
      })
    })
  }
}
