//! # Notifications
//!
//! The [`Broker`] carries marketplace events between actors. The
//! [`NotificationService`] subscribes to it, renders each event into an
//! [`Email`] and hands it to a [`Mailer`].

mod broker;
mod mailer;
mod service;
pub mod templates;

pub use broker::{
    Broker, BrokerEvent, PaymentCompleted, PaymentFailed, UserCreated, PAYMENT_COMPLETED,
    PAYMENT_FAILED, USER_CREATED,
};
pub use mailer::{Email, MailError, Mailer, OutboxMailer};
pub use service::NotificationService;
