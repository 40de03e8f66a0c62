//! Transient notifications raised by controller transitions.

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(4);
const MAX_VISIBLE_NOTIFICATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationSeverity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub severity: NotificationSeverity,
    pub message: String,
    pub detail: Option<String>,
    pub raised_at: Instant,
}

#[derive(Debug)]
pub struct Notifications {
    items: VecDeque<Notification>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(
        &mut self,
        severity: NotificationSeverity,
        message: impl Into<String>,
        detail: Option<String>,
    ) {
        if self.items.len() == MAX_VISIBLE_NOTIFICATIONS {
            self.items.pop_front();
        }
        self.items.push_back(Notification {
            severity,
            message: message.into(),
            detail,
            raised_at: Instant::now(),
        });
    }

    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items
            .retain(|item| now.saturating_duration_since(item.raised_at) < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}
