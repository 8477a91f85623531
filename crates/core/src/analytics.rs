//! Event naming and product display names for the analytics aggregate.

/// Counted funnel actions surfaced by the analytics summary.
pub mod actions {
    pub const PAGE_VIEW: &str = "page_view";
    pub const NEWSLETTER_SIGNUP: &str = "newsletter_signup";
    pub const PAYMENT_INITIATED: &str = "payment_initiated";
    pub const PAYMENT_SUCCESS: &str = "payment_success";
    pub const PAYMENT_CANCELLED: &str = "payment_cancelled";
}

/// Prefix distinguishing free research downloads in the `downloads` table.
pub const RESEARCH_PRODUCT_PREFIX: &str = "research:";

/// The product key recorded for a research paper download.
pub fn research_product_key(paper_id: &str) -> String {
    format!("{RESEARCH_PRODUCT_PREFIX}{paper_id}")
}

/// Whether a recorded product key refers to a research paper.
pub fn is_research_product(product: &str) -> bool {
    product.starts_with(RESEARCH_PRODUCT_PREFIX)
}

/// Human-readable name for a recorded product key.
pub fn product_display_name(product: &str) -> String {
    match product {
        "book" => "The Psychology of Sustainable Wealth".to_string(),
        "bundle" => "The Psychology of Sustainable Wealth (Bundle)".to_string(),
        "research:ai-job-security" => "AI, Job Security, and the Human Condition".to_string(),
        other => match other.strip_prefix(RESEARCH_PRODUCT_PREFIX) {
            Some(paper_id) => format!("Research Paper: {paper_id}"),
            None => other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn research_keys_round_trip() {
        let key = research_product_key("ai-job-security");
        assert_eq!(key, "research:ai-job-security");
        assert!(is_research_product(&key));
        assert!(!is_research_product("book"));
    }

    #[test]
    fn known_products_have_display_names() {
        assert_eq!(
            product_display_name("book"),
            "The Psychology of Sustainable Wealth"
        );
        assert_eq!(
            product_display_name("research:ai-job-security"),
            "AI, Job Security, and the Human Condition"
        );
    }

    #[test]
    fn unknown_research_papers_get_a_generic_name() {
        assert_eq!(
            product_display_name("research:future-of-work"),
            "Research Paper: future-of-work"
        );
    }

    #[test]
    fn unknown_products_pass_through() {
        assert_eq!(product_display_name("poster"), "poster");
    }
}
