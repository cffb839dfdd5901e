use anyhow::Context;
use std::io::{IsTerminal, Read};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicer::{
  application::invoice::{ExportInvoiceUseCase, InvoiceSession},
  domain::document::HtmlRenderer,
  domain::invoice::{DictationCapability, InvoiceModel, InvoiceState},
  infrastructure::{config::Config, pdf::WkHtmlToPdfGenerator},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoicer=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  let model = match read_draft()? {
    Some(state) => {
      tracing::info!(items = state.items.len(), "Loaded invoice draft from stdin");
      InvoiceModel::from_state(state).context("Invoice draft is invalid")?
    }
    None => {
      let defaults = config
        .invoice
        .defaults()
        .context("Invalid invoice defaults in configuration")?;
      let today = chrono::Utc::now().date_naive();
      let state =
        InvoiceState::new(&defaults, today).context("Invalid payment window in configuration")?;
      InvoiceModel::new(state)
    }
  };

  // No recogniser is wired into the command-line front end.
  let session = InvoiceSession::new(model, DictationCapability::Unavailable);
  print!("{}", session.preview().to_text());

  let generator = WkHtmlToPdfGenerator::new(
    config.pdf.output_dir(),
    config.pdf.wkhtmltopdf_path.clone(),
  );
  let export = ExportInvoiceUseCase::new(
    HtmlRenderer::new().context("Failed to compile invoice template")?,
    Arc::new(generator),
  );

  let response = export
    .execute(&session.model().snapshot())
    .await
    .context("Failed to export invoice")?;
  println!();
  println!("Saved {}", response.pdf_path.display());

  Ok(())
}

/// Reads a JSON invoice draft piped on stdin. Nothing piped means a fresh invoice.
fn read_draft() -> anyhow::Result<Option<InvoiceState>> {
  let mut stdin = std::io::stdin();
  if stdin.is_terminal() {
    return Ok(None);
  }

  let mut raw = String::new();
  stdin
    .read_to_string(&mut raw)
    .context("Failed to read invoice draft from stdin")?;
  if raw.trim().is_empty() {
    return Ok(None);
  }

  let state = serde_json::from_str(&raw).context("Invoice draft is not valid JSON")?;
  Ok(Some(state))
}
