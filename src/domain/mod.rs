pub mod document;
pub mod invoice;
