use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::document::{HtmlRenderer, PrintDocument};
use crate::domain::invoice::{InvoiceError, InvoiceState, PdfGenerator};

#[derive(Debug, Serialize)]
pub struct ExportInvoiceResponse {
  pub pdf_path: PathBuf,
  pub invoice_number: String,
  pub grand_total: Decimal,
}

/// Lays a snapshot out as a print document and hands its HTML to the PDF printer.
pub struct ExportInvoiceUseCase {
  renderer: HtmlRenderer,
  pdf_generator: Arc<dyn PdfGenerator>,
}

impl ExportInvoiceUseCase {
  pub fn new(renderer: HtmlRenderer, pdf_generator: Arc<dyn PdfGenerator>) -> Self {
    Self {
      renderer,
      pdf_generator,
    }
  }

  pub async fn execute(&self, snapshot: &InvoiceState) -> Result<ExportInvoiceResponse, InvoiceError> {
    let document = PrintDocument::render(snapshot, snapshot.currency_symbol());
    let html = self.renderer.render(&document)?;

    tracing::info!(
      invoice_number = %snapshot.invoice_number,
      items = snapshot.items.len(),
      pages = document.pages.len(),
      "Exporting invoice"
    );
    let pdf_path = self.pdf_generator.generate_invoice_pdf(&html).await?;
    tracing::info!("Invoice exported to {}", pdf_path.display());

    Ok(ExportInvoiceResponse {
      pdf_path,
      invoice_number: snapshot.invoice_number.clone(),
      grand_total: snapshot.grand_total(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::{Adjustment, LineItem};
  use async_trait::async_trait;
  use rust_decimal_macros::dec;
  use std::sync::Mutex;

  #[derive(Default)]
  struct RecordingPdfGenerator {
    documents: Mutex<Vec<String>>,
  }

  #[async_trait]
  impl PdfGenerator for RecordingPdfGenerator {
    async fn generate_invoice_pdf(&self, html: &str) -> Result<PathBuf, InvoiceError> {
      self.documents.lock().unwrap().push(html.to_string());
      Ok(PathBuf::from("out/invoice.pdf"))
    }
  }

  struct FailingPdfGenerator;

  #[async_trait]
  impl PdfGenerator for FailingPdfGenerator {
    async fn generate_invoice_pdf(&self, _html: &str) -> Result<PathBuf, InvoiceError> {
      Err(InvoiceError::PdfGenerationFailed("printer offline".to_string()))
    }
  }

  fn snapshot() -> InvoiceState {
    InvoiceState {
      items: vec![
        LineItem::new("Web Design", 1, dec!(1500)).unwrap(),
        LineItem::new("Logo Design", 1, dec!(500)).unwrap(),
        LineItem::new("Hosting", 12, dec!(25)).unwrap(),
      ],
      tax: Adjustment::percentage(dec!(10)).unwrap(),
      discount: Adjustment::percentage(dec!(5)).unwrap(),
      shipping: dec!(25),
      invoice_number: "INV-1".to_string(),
      ..InvoiceState::default()
    }
  }

  #[tokio::test]
  async fn test_export_hands_rendered_html_to_generator() {
    let generator = Arc::new(RecordingPdfGenerator::default());
    let use_case = ExportInvoiceUseCase::new(HtmlRenderer::new().unwrap(), generator.clone());

    let response = use_case.execute(&snapshot()).await.unwrap();
    assert_eq!(response.pdf_path, PathBuf::from("out/invoice.pdf"));
    assert_eq!(response.grand_total, dec!(2440));

    let documents = generator.documents.lock().unwrap();
    assert_eq!(documents.len(), 1);
    assert!(documents[0].contains("Total: $2440.00"));
  }

  #[tokio::test]
  async fn test_exported_totals_match_print_layout() {
    let state = InvoiceState {
      items: vec![LineItem::new("Consulting", 1, dec!(1000)).unwrap()],
      tax: Adjustment::percentage(dec!(10)).unwrap(),
      shipping: dec!(20),
      ..InvoiceState::default()
    };
    let generator = Arc::new(RecordingPdfGenerator::default());
    let use_case = ExportInvoiceUseCase::new(HtmlRenderer::new().unwrap(), generator.clone());
    use_case.execute(&state).await.unwrap();

    let document = PrintDocument::render(&state, "$");
    let texts: Vec<_> = document.texts().collect();
    assert!(texts.contains(&"Tax (10%): $100.00"));

    let html = &generator.documents.lock().unwrap()[0];
    for line in ["Tax (10%): $100.00", "Shipping: $20.00", "Total: $1120.00"] {
      assert!(html.contains(line), "missing '{}'", line);
    }
    assert!(!html.contains("+$"));
  }

  #[tokio::test]
  async fn test_export_surfaces_generator_failure() {
    let use_case = ExportInvoiceUseCase::new(HtmlRenderer::new().unwrap(), Arc::new(FailingPdfGenerator));
    let err = use_case.execute(&snapshot()).await.unwrap_err();
    assert!(matches!(err, InvoiceError::PdfGenerationFailed(_)));
  }
}
