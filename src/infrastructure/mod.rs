//! Infrastructure layer
//!
//! Adapters behind the domain ports (PDF printing, dictation) and
//! configuration loading.

pub mod config;
pub mod dictation;
pub mod pdf;
