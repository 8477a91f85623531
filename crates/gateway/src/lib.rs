//! Paystack payment gateway integration.
//!
//! - [`client`] — server-to-server transaction verification. The gateway's
//!   answer is the only thing that is ever trusted about a payment; a
//!   client-asserted success on its own authorizes nothing.
//! - [`types`] — wire types for the verify endpoint and webhook events.
//! - [`metadata`] — one-shot parsing of the checkout widget's free-form
//!   custom fields into a structured record.
//! - [`signature`] — webhook signature verification over the raw body.

pub mod client;
pub mod metadata;
pub mod signature;
pub mod types;

pub use client::{GatewayError, PaystackClient};
pub use metadata::CheckoutDetails;
pub use types::{ChargeData, CheckoutMetadata, Customer, GatewayEvent, VerifyData, VerifyEnvelope};
