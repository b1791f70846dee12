//! Toast notifications surfaced to guests.
//!
//! The controller never reaches for ambient UI context; the page hands it a
//! [`Notifier`] at construction.

use std::sync::Arc;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Warning,
    Destructive,
}

/// Notification surface exposing `show(title, description, variant)`.
pub trait Notifier: Send + Sync {
    fn show(&self, title: &str, description: &str, variant: ToastVariant);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn show(&self, title: &str, description: &str, variant: ToastVariant) {
        (**self).show(title, description, variant);
    }
}

/// Notifier that writes every toast to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show(&self, title: &str, description: &str, variant: ToastVariant) {
        match variant {
            ToastVariant::Default => tracing::info!(title, description, "Guestbook notice"),
            ToastVariant::Warning => tracing::warn!(title, description, "Guestbook warning"),
            ToastVariant::Destructive => tracing::error!(title, description, "Guestbook error"),
        }
    }
}
