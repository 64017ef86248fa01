//! Transient, dismissible notifications surfaced to the user.

use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

#[derive(Debug, Default)]
pub struct Notifier {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, title: &str, description: &str) -> u64 {
        info!(title, description, "notification");
        self.push(title, description, ToastVariant::Default)
    }

    pub fn error(&mut self, title: &str, description: &str) -> u64 {
        warn!(title, description, "error notification");
        self.push(title, description, ToastVariant::Destructive)
    }

    fn push(&mut self, title: &str, description: &str, variant: ToastVariant) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            title: title.into(),
            description: description.into(),
            variant,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn errors(&self) -> impl Iterator<Item = &Toast> {
        self.toasts
            .iter()
            .filter(|t| t.variant == ToastVariant::Destructive)
    }

    /// Hands over every pending toast, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }
}
