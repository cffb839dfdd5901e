pub mod currency;
pub mod dictation;
pub mod entities;
pub mod errors;
pub mod model;
pub mod ports;
pub mod value_objects;

pub use currency::{CURRENCIES, CurrencyInfo, FALLBACK_SYMBOL};
pub use dictation::{DictationEvent, normalize_dictated_text};
pub use entities::{InvoiceDefaults, InvoiceState, InvoiceTotals, LineItem, LineItemPatch, Party};
pub use errors::InvoiceError;
pub use model::InvoiceModel;
pub use ports::{DictationCapability, DictationProvider, DictationStream, PdfGenerator};
pub use value_objects::{
  Adjustment, AdjustmentKind, AdjustmentMode, CUSTOM_CURRENCY, CurrencySelection, InvoiceField,
  LineItemColumn, LineItemId, MAX_AMOUNT, MAX_PERCENT, ValueObjectError, format_date,
};
