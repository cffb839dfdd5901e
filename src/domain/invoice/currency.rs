use serde::Serialize;

use super::value_objects::CurrencySelection;

/// Symbol shown when the selected code is not in the registry.
pub const FALLBACK_SYMBOL: &str = "$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
  pub code: &'static str,
  pub symbol: &'static str,
  pub name: &'static str,
}

pub const CURRENCIES: [CurrencyInfo; 10] = [
  CurrencyInfo { code: "USD", symbol: "$", name: "US Dollar" },
  CurrencyInfo { code: "EUR", symbol: "€", name: "Euro" },
  CurrencyInfo { code: "GBP", symbol: "£", name: "British Pound" },
  CurrencyInfo { code: "JPY", symbol: "¥", name: "Japanese Yen" },
  CurrencyInfo { code: "CNY", symbol: "¥", name: "Chinese Yuan" },
  CurrencyInfo { code: "INR", symbol: "₹", name: "Indian Rupee" },
  CurrencyInfo { code: "CAD", symbol: "$", name: "Canadian Dollar" },
  CurrencyInfo { code: "AUD", symbol: "$", name: "Australian Dollar" },
  CurrencyInfo { code: "CHF", symbol: "Fr", name: "Swiss Franc" },
  CurrencyInfo { code: "HKD", symbol: "$", name: "Hong Kong Dollar" },
];

pub fn lookup(code: &str) -> Option<&'static CurrencyInfo> {
  CURRENCIES.iter().find(|currency| currency.code == code)
}

/// Display symbol for a selection. The stored custom symbol is only used
/// while the custom sentinel is selected.
pub fn resolve_symbol<'a>(selection: &CurrencySelection, custom_symbol: &'a str) -> &'a str {
  match selection {
    CurrencySelection::Custom => custom_symbol,
    CurrencySelection::Registry(code) => lookup(code)
      .map(|currency| currency.symbol)
      .unwrap_or(FALLBACK_SYMBOL),
  }
}
