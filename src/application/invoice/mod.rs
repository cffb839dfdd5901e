pub mod export_invoice;
pub mod session;

pub use export_invoice::{ExportInvoiceResponse, ExportInvoiceUseCase};
pub use session::InvoiceSession;
