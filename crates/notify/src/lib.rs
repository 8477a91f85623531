//! Outbound notifications: transactional email and the newsletter
//! subscriber store.
//!
//! Both integrations are best-effort collaborators. Email failures never
//! block capability issuance, and either integration can be left
//! unconfigured (its `from_env` returns `None`) without affecting the rest
//! of the service.

pub mod mailer;
pub mod messages;
pub mod subscriber;

pub use mailer::{admin_recipients_from_env, EmailConfig, EmailError, Mailer};
pub use messages::PurchaseMail;
pub use subscriber::{NewSubscriber, SubscriberConfig, SubscriberError, SubscriberStore};
