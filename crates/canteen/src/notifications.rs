//! # Notification Board
//!
//! What the diner currently sees: at most one general notification and at most one order-ready
//! notification. Showing a new one replaces whatever occupied its slot. A notification disappears
//! once its duration has passed since it was shown; expiry is checked on read, so nothing needs
//! to run in the background.

use crate::model::{Notification, NotificationConfig, OrderReadyData};
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Shown {
    notification: Notification,
    shown_at: Instant,
}

impl Shown {
    fn visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.notification.duration
    }
}

/// What is on screen right now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSnapshot {
    pub general: Option<Notification>,
    pub order_ready: Option<Notification>,
}

#[derive(Debug, Default)]
pub struct NotificationBoard {
    general: Option<Shown>,
    order_ready: Option<Shown>,
}

impl NotificationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, config: impl Into<NotificationConfig>, now: Instant) {
        self.general = Some(Shown {
            notification: config.into().into_notification(),
            shown_at: now,
        });
    }

    pub fn show_order_ready(&mut self, data: OrderReadyData, message: Option<String>, now: Instant) {
        self.order_ready = Some(Shown {
            notification: Notification::order_ready(data, message),
            shown_at: now,
        });
    }

    pub fn hide(&mut self) {
        self.general = None;
    }

    pub fn hide_order_ready(&mut self) {
        self.order_ready = None;
    }

    pub fn clear(&mut self) {
        self.hide();
        self.hide_order_ready();
    }

    pub fn snapshot(&self, now: Instant) -> NotificationSnapshot {
        let visible = |slot: &Option<Shown>| {
            slot.as_ref()
                .filter(|shown| shown.visible_at(now))
                .map(|shown| shown.notification.clone())
        };
        NotificationSnapshot {
            general: visible(&self.general),
            order_ready: visible(&self.order_ready),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NotificationKind, OrderId};
    use std::time::Duration;

    fn ready_data() -> OrderReadyData {
        OrderReadyData {
            order_id: OrderId::from("order_1"),
            items: Vec::new(),
            total: 800,
            restaurant_name: "Food Court".into(),
        }
    }

    #[test]
    fn newer_notification_replaces_older() {
        let now = Instant::now();
        let mut board = NotificationBoard::new();
        board.show("first", now);
        board.show(
            NotificationConfig::new("second").with_kind(NotificationKind::Error),
            now,
        );

        let general = board.snapshot(now).general.unwrap();
        assert_eq!(general.message, "second");
        assert_eq!(general.kind, NotificationKind::Error);
    }

    #[test]
    fn notifications_expire_after_their_duration() {
        let now = Instant::now();
        let mut board = NotificationBoard::new();
        board.show("Saved", now);
        board.show_order_ready(ready_data(), None, now);

        let later = now + Duration::from_millis(6000);
        let snapshot = board.snapshot(later);
        assert!(snapshot.general.is_none());
        assert!(snapshot.order_ready.is_some());

        assert!(board
            .snapshot(now + Duration::from_millis(8000))
            .order_ready
            .is_none());
    }

    #[test]
    fn hiding_one_slot_leaves_the_other() {
        let now = Instant::now();
        let mut board = NotificationBoard::new();
        board.show("Saved", now);
        board.show_order_ready(ready_data(), Some("Come get it".into()), now);

        board.hide();
        let snapshot = board.snapshot(now);
        assert!(snapshot.general.is_none());
        assert_eq!(snapshot.order_ready.unwrap().message, "Come get it");

        board.clear();
        assert_eq!(board.snapshot(now), NotificationSnapshot::default());
    }
}
