//! Application layer
//!
//! The editing session that owns an invoice and its dictation
//! subscription, and the export use case that turns a snapshot into a PDF.

pub mod invoice;
