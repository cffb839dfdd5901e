mod wkhtmltopdf_generator;

pub use wkhtmltopdf_generator::{EXPORT_FILE_NAME, WkHtmlToPdfGenerator};
