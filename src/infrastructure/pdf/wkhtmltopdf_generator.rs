use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::ports::PdfGenerator;

pub const EXPORT_FILE_NAME: &str = "invoice.pdf";
const HTML_FILE_NAME: &str = "invoice.html";

pub struct WkHtmlToPdfGenerator {
  pdf_output_dir: PathBuf,
  wkhtmltopdf_path: String,
}

impl WkHtmlToPdfGenerator {
  pub fn new(pdf_output_dir: PathBuf, wkhtmltopdf_path: Option<String>) -> Self {
    let wkhtmltopdf_path = wkhtmltopdf_path.unwrap_or_else(|| "wkhtmltopdf".to_string());

    Self {
      pdf_output_dir,
      wkhtmltopdf_path,
    }
  }

  pub fn output_path(&self) -> PathBuf {
    self.pdf_output_dir.join(EXPORT_FILE_NAME)
  }

  async fn verify_wkhtmltopdf_installed(&self) -> Result<(), InvoiceError> {
    let output = Command::new(&self.wkhtmltopdf_path)
      .arg("--version")
      .output()
      .await
      .map_err(|e| {
        InvoiceError::PdfGenerationFailed(format!(
          "wkhtmltopdf not found: {}. Please install wkhtmltopdf.",
          e
        ))
      })?;

    if !output.status.success() {
      return Err(InvoiceError::PdfGenerationFailed(
        "wkhtmltopdf is not working correctly".to_string(),
      ));
    }

    Ok(())
  }
}

#[async_trait]
impl PdfGenerator for WkHtmlToPdfGenerator {
  async fn generate_invoice_pdf(&self, html: &str) -> Result<PathBuf, InvoiceError> {
    self.verify_wkhtmltopdf_installed().await?;

    tokio::fs::create_dir_all(&self.pdf_output_dir)
      .await
      .map_err(|e| {
        InvoiceError::PdfGenerationFailed(format!("Cannot create output directory: {}", e))
      })?;

    let html_path = self.pdf_output_dir.join(HTML_FILE_NAME);
    tokio::fs::write(&html_path, html).await.map_err(|e| {
      InvoiceError::PdfGenerationFailed(format!("Cannot write invoice HTML: {}", e))
    })?;

    let output_path = self.output_path();
    tracing::info!("Generating PDF from {}", html_path.display());

    let output = Command::new(&self.wkhtmltopdf_path)
      .args([
        "--page-size",
        "A4",
        "--margin-top",
        "0mm",
        "--margin-bottom",
        "0mm",
        "--margin-left",
        "0mm",
        "--margin-right",
        "0mm",
        "--disable-smart-shrinking",
        "--encoding",
        "utf-8",
        "--quiet",
      ])
      .arg(&html_path)
      .arg(&output_path)
      .output()
      .await
      .map_err(|e| {
        InvoiceError::PdfGenerationFailed(format!("wkhtmltopdf execution failed: {}", e))
      })?;

    if let Err(e) = tokio::fs::remove_file(&html_path).await {
      tracing::warn!("Failed to remove intermediate HTML {}: {}", html_path.display(), e);
    }

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(InvoiceError::PdfGenerationFailed(format!(
        "wkhtmltopdf failed: {}",
        stderr
      )));
    }

    if !tokio::fs::try_exists(&output_path).await.unwrap_or(false) {
      return Err(InvoiceError::PdfGenerationFailed(
        "PDF file was not created".to_string(),
      ));
    }

    Ok(output_path)
  }
}
