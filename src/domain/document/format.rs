use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::invoice::{AdjustmentKind, AdjustmentMode, InvoiceState, InvoiceTotals};

/// Two fraction digits, halves rounded away from zero.
pub fn round_money(value: Decimal) -> Decimal {
  let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
  // -0.001 rounds to a signed zero
  if rounded.is_zero() { Decimal::ZERO } else { rounded }
}

pub fn format_money(symbol: &str, value: Decimal) -> String {
  format!("{}{:.2}", symbol, round_money(value))
}

/// Percent values print as typed: `10`, `7.5`.
pub fn format_percent(value: Decimal) -> String {
  value.normalize().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalsLineKind {
  Subtotal,
  Tax,
  Discount,
  Shipping,
  Total,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TotalsLine {
  pub kind: TotalsLineKind,
  pub label: String,
  pub value: String,
}

/// Whether tax and shipping carry an explicit `+` sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignStyle {
  Explicit,
  Plain,
}

/// Subtotal, then tax, discount and shipping when set, then the total.
pub fn totals_lines(state: &InvoiceState, symbol: &str, style: SignStyle) -> Vec<TotalsLine> {
  let totals = InvoiceTotals::calculate(state);
  let plus = match style {
    SignStyle::Explicit => "+",
    SignStyle::Plain => "",
  };

  let mut lines = vec![TotalsLine {
    kind: TotalsLineKind::Subtotal,
    label: "Subtotal".to_string(),
    value: format_money(symbol, totals.subtotal),
  }];

  if state.tax.is_set() {
    lines.push(TotalsLine {
      kind: TotalsLineKind::Tax,
      label: adjustment_label(AdjustmentKind::Tax, state),
      value: format!("{}{}", plus, format_money(symbol, totals.tax)),
    });
  }

  if state.discount.is_set() {
    lines.push(TotalsLine {
      kind: TotalsLineKind::Discount,
      label: adjustment_label(AdjustmentKind::Discount, state),
      value: format!("-{}", format_money(symbol, totals.discount)),
    });
  }

  if state.shipping > Decimal::ZERO {
    lines.push(TotalsLine {
      kind: TotalsLineKind::Shipping,
      label: "Shipping".to_string(),
      value: format!("{}{}", plus, format_money(symbol, totals.shipping)),
    });
  }

  lines.push(TotalsLine {
    kind: TotalsLineKind::Total,
    label: "Total".to_string(),
    value: format_money(symbol, totals.grand_total),
  });

  lines
}

fn adjustment_label(kind: AdjustmentKind, state: &InvoiceState) -> String {
  let adjustment = match kind {
    AdjustmentKind::Tax => state.tax,
    AdjustmentKind::Discount => state.discount,
  };
  match adjustment.mode {
    AdjustmentMode::Percentage => {
      format!("{} ({}%)", kind.label(), format_percent(adjustment.value))
    }
    AdjustmentMode::FixedAmount => kind.label().to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::{Adjustment, LineItem};
  use rust_decimal_macros::dec;

  #[test]
  fn test_format_money_rounds_half_away_from_zero() {
    assert_eq!(format_money("$", dec!(2440)), "$2440.00");
    assert_eq!(format_money("$", dec!(0.125)), "$0.13");
    assert_eq!(format_money("$", dec!(-0.125)), "$-0.13");
    assert_eq!(format_money("€", dec!(1.005)), "€1.01");
    assert_eq!(format_money("$", dec!(-0.001)), "$0.00");
  }

  #[test]
  fn test_format_percent() {
    assert_eq!(format_percent(dec!(10)), "10");
    assert_eq!(format_percent(dec!(7.50)), "7.5");
  }

  #[test]
  fn test_totals_lines_order_and_omissions() {
    let state = InvoiceState {
      items: vec![LineItem::new("Web Design", 1, dec!(1500)).unwrap()],
      discount: Adjustment::fixed(dec!(100)).unwrap(),
      ..InvoiceState::default()
    };

    let lines = totals_lines(&state, "$", SignStyle::Explicit);
    let kinds: Vec<_> = lines.iter().map(|line| line.kind).collect();
    assert_eq!(
      kinds,
      vec![TotalsLineKind::Subtotal, TotalsLineKind::Discount, TotalsLineKind::Total]
    );
    assert_eq!(lines[1].label, "Discount");
    assert_eq!(lines[1].value, "-$100.00");
    assert_eq!(lines[2].value, "$1400.00");
  }

  #[test]
  fn test_totals_lines_sign_styles() {
    let state = InvoiceState {
      items: vec![LineItem::new("Web Design", 1, dec!(1000)).unwrap()],
      tax: Adjustment::percentage(dec!(10)).unwrap(),
      shipping: dec!(25),
      ..InvoiceState::default()
    };

    let explicit = totals_lines(&state, "$", SignStyle::Explicit);
    assert_eq!(explicit[1].label, "Tax (10%)");
    assert_eq!(explicit[1].value, "+$100.00");
    assert_eq!(explicit[2].value, "+$25.00");

    let plain = totals_lines(&state, "$", SignStyle::Plain);
    assert_eq!(plain[1].value, "$100.00");
    assert_eq!(plain[2].value, "$25.00");
  }
}
