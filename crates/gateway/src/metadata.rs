//! Structured view over the checkout widget's custom fields.
//!
//! The widget attaches buyer details as a loosely typed `custom_fields`
//! array. It is parsed exactly once, here, into named optional fields;
//! handlers never dig through the raw array themselves.

use crate::types::CheckoutMetadata;

/// Buyer details recovered from checkout metadata.
///
/// Every field is optional: older widget versions and manual dashboard
/// charges omit some or all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
    /// Free-text variant label (`"Hardcopy Book"`, `"Bundle"`, …) used for
    /// book-type classification.
    pub product_label: Option<String>,
}

impl CheckoutDetails {
    /// Extract known fields from gateway metadata. Unknown variable names
    /// and non-scalar values are ignored.
    pub fn from_metadata(metadata: Option<&CheckoutMetadata>) -> Self {
        let mut details = Self::default();
        let Some(fields) = metadata.and_then(|m| m.custom_fields.as_deref()) else {
            return details;
        };

        for field in fields {
            let Some(value) = scalar_value(&field.value) else {
                continue;
            };
            match field.variable_name.as_str() {
                "customer_name" => details.customer_name = Some(value),
                "phone" => details.phone = Some(value),
                "delivery_address" => details.delivery_address = Some(value),
                "product" => details.product_label = Some(value),
                _ => {}
            }
        }

        details
    }
}

/// Render a scalar JSON value as a trimmed, non-empty string.
fn scalar_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_from(json: &str) -> CheckoutMetadata {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn extracts_all_known_fields() {
        let metadata = metadata_from(
            r#"{
                "custom_fields": [
                    { "display_name": "Name", "variable_name": "customer_name", "value": "Ama Mensah" },
                    { "display_name": "Phone", "variable_name": "phone", "value": "0241234567" },
                    { "display_name": "Product", "variable_name": "product", "value": "Hardcopy Book" },
                    { "display_name": "Address", "variable_name": "delivery_address", "value": "12 Oxford St, Accra, Greater Accra, GA-145, Ghana" }
                ]
            }"#,
        );

        let details = CheckoutDetails::from_metadata(Some(&metadata));
        assert_eq!(details.customer_name.as_deref(), Some("Ama Mensah"));
        assert_eq!(details.phone.as_deref(), Some("0241234567"));
        assert_eq!(details.product_label.as_deref(), Some("Hardcopy Book"));
        assert!(details.delivery_address.as_deref().unwrap().contains("Accra"));
    }

    #[test]
    fn numeric_values_are_stringified() {
        let metadata = metadata_from(
            r#"{ "custom_fields": [ { "variable_name": "phone", "value": 241234567 } ] }"#,
        );
        let details = CheckoutDetails::from_metadata(Some(&metadata));
        assert_eq!(details.phone.as_deref(), Some("241234567"));
    }

    #[test]
    fn unknown_fields_and_blanks_are_ignored() {
        let metadata = metadata_from(
            r#"{
                "custom_fields": [
                    { "variable_name": "affiliate_id", "value": "aff-9" },
                    { "variable_name": "customer_name", "value": "   " },
                    { "variable_name": "phone", "value": null }
                ]
            }"#,
        );
        let details = CheckoutDetails::from_metadata(Some(&metadata));
        assert_eq!(details, CheckoutDetails::default());
    }

    #[test]
    fn absent_metadata_yields_empty_details() {
        assert_eq!(
            CheckoutDetails::from_metadata(None),
            CheckoutDetails::default()
        );
        let metadata = metadata_from("{}");
        assert_eq!(
            CheckoutDetails::from_metadata(Some(&metadata)),
            CheckoutDetails::default()
        );
    }
}
