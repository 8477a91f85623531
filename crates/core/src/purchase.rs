//! Book-type classification for checkout metadata.
//!
//! The payment widget describes the purchased variant in a free-text
//! `product` custom field ("Hardcopy Book", "Bundle", "eBook (PDF)", …).
//! Classification happens once, here, instead of being re-derived ad hoc
//! by every handler.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// The purchased book variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookType {
    /// Digital PDF only.
    Ebook,
    /// Physical book, shipped to a delivery address.
    Hardcopy,
    /// Digital bundle (ebook plus companion material).
    Bundle,
}

impl BookType {
    /// The value stored in the `purchases.book_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookType::Ebook => "ebook",
            BookType::Hardcopy => "hardcopy",
            BookType::Bundle => "bundle",
        }
    }

    /// Parse a stored book-type value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ebook" => Some(BookType::Ebook),
            "hardcopy" => Some(BookType::Hardcopy),
            "bundle" => Some(BookType::Bundle),
            _ => None,
        }
    }

    /// Whether this variant is delivered as a download.
    pub fn is_digital(&self) -> bool {
        matches!(self, BookType::Ebook | BookType::Bundle)
    }

    /// The catalog product a capability should be minted for, if any.
    /// Hardcopy purchases are fulfilled by shipping, not by download.
    pub fn download_product(&self) -> Option<Product> {
        match self {
            BookType::Ebook => Some(Product::Book),
            BookType::Bundle => Some(Product::Bundle),
            BookType::Hardcopy => None,
        }
    }
}

/// Classify a purchase from the free-text product label and the explicit
/// bundle flag.
///
/// `bundle` anywhere in the label wins over `hardcopy`; an explicit
/// `include_bundle` wins over the label entirely. Anything unrecognized is
/// treated as a plain ebook.
pub fn classify_book_type(label: Option<&str>, include_bundle: bool) -> BookType {
    if include_bundle {
        return BookType::Bundle;
    }
    let Some(label) = label else {
        return BookType::Ebook;
    };
    let label = label.to_ascii_lowercase();
    if label.contains("bundle") {
        BookType::Bundle
    } else if label.contains("hardcopy") || label.contains("hard copy") {
        BookType::Hardcopy
    } else {
        BookType::Ebook
    }
}
