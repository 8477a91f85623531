pub mod analytics;
pub mod downloads;
pub mod newsletter;
pub mod payments;
pub mod webhooks;
