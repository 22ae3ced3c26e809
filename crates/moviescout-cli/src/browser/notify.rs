//! Transient notifications ("toasts").

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::i18n::TranslationKey;

/// Maximum number of toasts visible at once.
const MAX_VISIBLE: usize = 3;

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Search answered with zero results.
    BadRequest,
    /// Blank search submitted.
    NoRequest,
}

impl NoticeKind {
    /// Dictionary key of the message for this kind.
    #[must_use]
    pub const fn message_key(self) -> TranslationKey {
        match self {
            Self::BadRequest => TranslationKey::ToastBadRequest,
            Self::NoRequest => TranslationKey::ToastNoRequest,
        }
    }
}

/// Fire-and-forget notification sink.
pub trait Notifier {
    /// Shows `message` to the user.
    fn notify(&mut self, kind: NoticeKind, message: &str);
}

/// A posted toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Category.
    pub kind: NoticeKind,
    /// Localized text.
    pub message: String,
    posted_at: Instant,
}

/// Bounded, self-expiring toast stack drawn in the corner of the screen.
#[derive(Debug)]
pub struct ToastQueue {
    ttl: Duration,
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    /// Creates an empty queue whose toasts live for `ttl`.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            toasts: VecDeque::new(),
        }
    }

    /// Drops expired toasts. Returns `true` if any were removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        let ttl = self.ttl;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.posted_at) < ttl);
        self.toasts.len() != before
    }

    /// Toasts to draw, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Number of toasts currently shown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Whether no toast is shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, kind: NoticeKind, message: &str) {
        tracing::debug!(?kind, message, "toast");
        if self.toasts.len() >= MAX_VISIBLE {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            kind,
            message: String::from(message),
            posted_at: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_keys() {
        // Arrange & Act & Assert
        assert_eq!(
            NoticeKind::BadRequest.message_key(),
            TranslationKey::ToastBadRequest
        );
        assert_eq!(
            NoticeKind::NoRequest.message_key(),
            TranslationKey::ToastNoRequest
        );
    }

    #[test]
    fn test_queue_keeps_latest_three() {
        // Arrange
        let mut queue = ToastQueue::new(Duration::from_secs(4));

        // Act
        for i in 0..5 {
            queue.notify(NoticeKind::NoRequest, &format!("toast {i}"));
        }

        // Assert
        let messages: Vec<&str> = queue.visible().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["toast 2", "toast 3", "toast 4"]);
    }

    #[test]
    fn test_prune_removes_expired() {
        // Arrange
        let mut queue = ToastQueue::new(Duration::from_secs(4));
        queue.notify(NoticeKind::BadRequest, "nothing found");

        // Act
        let kept = queue.prune(Instant::now());
        let removed = queue.prune(Instant::now() + Duration::from_secs(5));

        // Assert
        assert!(!kept);
        assert!(removed);
        assert!(queue.is_empty());
    }
}
