// src/parser/mod.rs
// =============================================================================
// Page parsing: raw HTML in, queryable Document out.
//
// Submodules:
// - html: the Document wrapper around scraper and its queries
// - page: the records produced from a Document
// =============================================================================

mod html;
mod page;

pub use html::Document;
pub use page::{ExternalResources, PageRecord};
