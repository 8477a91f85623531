//! The closed set of downloadable products.
//!
//! Every product key the download endpoints accept is listed here at compile
//! time; anything outside the set is rejected before storage is touched.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Paid products
// ---------------------------------------------------------------------------

/// A paid product that can be embedded in a signed download link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    /// The ebook on its own.
    Book,
    /// The ebook plus companion material.
    Bundle,
}

impl Product {
    /// Parse a raw product key. Returns `None` for anything outside the set.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "book" => Some(Product::Book),
            "bundle" => Some(Product::Bundle),
            _ => None,
        }
    }

    /// The wire key for this product.
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Book => "book",
            Product::Bundle => "bundle",
        }
    }

    /// The catalog entry describing where the bytes live.
    pub fn entry(&self) -> &'static CatalogEntry {
        match self {
            Product::Book => &BOOK_ENTRY,
            Product::Bundle => &BUNDLE_ENTRY,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog entries
// ---------------------------------------------------------------------------

/// Maps a product key to a backing-store locator and a download filename.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Short product key as it appears in URLs and database rows.
    pub key: &'static str,
    /// Object key, relative to the bucket root or the local files root.
    pub object_key: &'static str,
    /// Filename presented in the `Content-Disposition` header.
    pub display_name: &'static str,
}

pub const BOOK_ENTRY: CatalogEntry = CatalogEntry {
    key: "book",
    object_key: "books/book.pdf",
    display_name: "The-Psychology-of-Sustainable-Wealth.pdf",
};

// The bundle currently ships the same PDF under its own display name.
pub const BUNDLE_ENTRY: CatalogEntry = CatalogEntry {
    key: "bundle",
    object_key: "books/book.pdf",
    display_name: "The-Psychology-of-Sustainable-Wealth-Bundle.pdf",
};

// ---------------------------------------------------------------------------
// Free research papers
// ---------------------------------------------------------------------------

/// Free research papers served without a signature.
pub const RESEARCH_PAPERS: &[CatalogEntry] = &[CatalogEntry {
    key: "ai-job-security",
    object_key: "books/ai-job-security-human-condition.pdf",
    display_name: "AI-Job-Security-and-the-Human-Condition.pdf",
}];

/// Look up a research paper by id. Unknown ids are rejected before any
/// storage access is attempted.
pub fn research_entry(id: &str) -> Option<&'static CatalogEntry> {
    RESEARCH_PAPERS.iter().find(|p| p.key == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
