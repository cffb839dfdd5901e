use std::sync::Arc;
use tera::Tera;

use super::print::PrintDocument;

const INVOICE_TEMPLATE_NAME: &str = "invoice.html";
const INVOICE_TEMPLATE: &str = include_str!("../../../templates/invoice.html.tera");

/// Lays the print document out as absolutely positioned A4 pages for the PDF printer.
#[derive(Clone)]
pub struct HtmlRenderer {
  tera: Arc<Tera>,
}

impl HtmlRenderer {
  /// Template is compiled into the binary; escaping is on for `.html` names.
  pub fn new() -> Result<Self, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(INVOICE_TEMPLATE_NAME, INVOICE_TEMPLATE)?;
    tera.autoescape_on(vec![".html"]);

    Ok(Self {
      tera: Arc::new(tera),
    })
  }

  pub fn render(&self, document: &PrintDocument) -> Result<String, tera::Error> {
    let context = tera::Context::from_serialize(document)?;
    self.tera.render(INVOICE_TEMPLATE_NAME, &context)
  }
}
