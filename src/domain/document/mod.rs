//! Document rendering
//!
//! Pure functions of an invoice snapshot and its resolved currency symbol:
//! the structured preview, the paginated print layout, and the HTML the
//! PDF printer consumes. Nothing here mutates or remembers state.

pub mod format;
pub mod html;
pub mod preview;
pub mod print;

pub use format::{SignStyle, TotalsLine, TotalsLineKind, format_money, round_money};
pub use html::HtmlRenderer;
pub use preview::{InvoicePreview, PartyBlock, PreviewRow};
pub use print::{Align, PrintDocument, PrintElement, PrintPage};
