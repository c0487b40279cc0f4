//! # Ready Timer
//!
//! Tracks paid orders until the kitchen should have them ready, then tells the diner.
//!
//! Unlike the account actor this is not a [`ResourceActor`](canteen_actor::ResourceActor): its
//! state is a list plus a set of sleeping tasks, and it needs to message itself when a timer
//! fires. It follows the same shape though: one task owns the state, a cloneable
//! [`ReadyTimerClient`](crate::clients::ReadyTimerClient) sends requests and awaits one-shot
//! replies.
//!
//! ## Timer lifecycle
//!
//! ```text
//! start ──► Active ──(delay elapsed)──► Ready   (order-ready notification shown)
//!              │
//!              └──(cancel / logout)───► Cancelled
//! ```
//!
//! Each timer is a spawned task racing `tokio::time::sleep` against a one-shot cancel token. When
//! the sleep wins, the task reports back with the generation it was started under; a report
//! whose generation no longer matches (the timer was replaced in the meantime) is dropped.
//!
//! Timers live only as long as the actor. Nothing is persisted, so a restart abandons them.
//!
//! The actor also owns the [`NotificationBoard`](crate::notifications::NotificationBoard), since
//! the two notifications it shows are the board's main traffic.

mod actor;
pub mod error;
pub mod messages;

pub use actor::ReadyTimerActor;
pub use error::ReadyTimerError;

use crate::clients::ReadyTimerClient;
use crate::model::{Amount, CartItem, OrderId, OrderIdClock, ServeOption};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// An order whose timer is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveOrder {
    pub order_id: OrderId,
    pub items: Vec<CartItem>,
    pub total: Amount,
    pub serve_option: Option<ServeOption>,
    pub restaurant_name: String,
    pub started_at: Instant,
    pub delay: Duration,
}

impl ActiveOrder {
    /// Whole seconds left: the delay minus the whole seconds elapsed, never below zero.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.started_at).as_secs();
        self.delay.as_secs().saturating_sub(elapsed)
    }
}

/// Creates a new ready-timer actor and its client; `ids` names drafts that carry no id.
pub fn new(buffer: usize, ids: Arc<OrderIdClock>) -> (ReadyTimerActor, ReadyTimerClient) {
    ReadyTimerActor::new(buffer, ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NotificationKind, OrderDraft, ORDER_READY_MESSAGE};
    use tokio::time::{advance, sleep};

    fn draft(id: &str, total: Amount) -> OrderDraft {
        OrderDraft {
            order_id: Some(OrderId::from(id)),
            items: vec![CartItem {
                name: "Jollof Rice".into(),
                price: total,
                quantity: 1,
                image: String::new(),
            }],
            serve_option: Some(ServeOption::Plate),
            total,
            restaurant_name: None,
        }
    }

    fn spawn() -> ReadyTimerClient {
        let (actor, client) = new(16, Arc::default());
        tokio::spawn(actor.run());
        client
    }

    #[test]
    fn remaining_counts_down_in_whole_seconds() {
        let started_at = Instant::now();
        let order = ActiveOrder {
            order_id: OrderId::from("order_1"),
            items: Vec::new(),
            total: 0,
            serve_option: None,
            restaurant_name: "Food Court".into(),
            started_at,
            delay: Duration::from_secs(30),
        };
        assert_eq!(order.remaining_secs(started_at), 30);
        assert_eq!(order.remaining_secs(started_at + Duration::from_millis(1500)), 29);
        assert_eq!(order.remaining_secs(started_at + Duration::from_secs(45)), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn order_becomes_ready_after_its_delay() {
        let client = spawn();
        let id = client
            .start_order_ready_timer(draft("order_100", 800), 30)
            .await
            .unwrap();
        assert_eq!(id, OrderId::from("order_100"));

        let placed = client.notifications().await.unwrap().general.unwrap();
        assert_eq!(placed.kind, NotificationKind::Success);
        assert_eq!(
            placed.message,
            "Order placed successfully! Your food will be ready in 30 seconds."
        );

        sleep(Duration::from_secs(10)).await;
        assert_eq!(client.get_order_remaining_time(id.clone()).await.unwrap(), 20);

        sleep(Duration::from_secs(21)).await;
        assert_eq!(client.get_order_remaining_time(id.clone()).await.unwrap(), 0);
        assert!(client.active_orders().await.unwrap().is_empty());

        let ready = client.notifications().await.unwrap().order_ready.unwrap();
        assert_eq!(ready.message, ORDER_READY_MESSAGE);
        let data = ready.order_data.unwrap();
        assert_eq!(data.order_id, id);
        assert_eq!(data.total, 800);
        assert_eq!(data.restaurant_name, "Food Court");
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_order_never_becomes_ready() {
        let client = spawn();
        let id = client
            .start_order_ready_timer(draft("order_200", 500), 30)
            .await
            .unwrap();

        sleep(Duration::from_secs(5)).await;
        assert!(client.cancel_order_timer(id.clone()).await.unwrap());
        assert!(!client.cancel_order_timer(id.clone()).await.unwrap());

        sleep(Duration::from_secs(26)).await;
        assert!(client.active_orders().await.unwrap().is_empty());
        assert!(client.notifications().await.unwrap().order_ready.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_an_id_replaces_its_timer() {
        let client = spawn();
        client
            .start_order_ready_timer(draft("order_300", 400), 10)
            .await
            .unwrap();
        sleep(Duration::from_secs(8)).await;
        client
            .start_order_ready_timer(draft("order_300", 600), 10)
            .await
            .unwrap();

        let active = client.active_orders().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].total, 600);

        // The first timer would have fired at 10s.
        sleep(Duration::from_secs(4)).await;
        assert!(client.notifications().await.unwrap().order_ready.is_none());
        assert_eq!(
            client
                .get_order_remaining_time(OrderId::from("order_300"))
                .await
                .unwrap(),
            6
        );

        sleep(Duration::from_secs(7)).await;
        let ready = client.notifications().await.unwrap().order_ready.unwrap();
        assert_eq!(ready.order_data.unwrap().total, 600);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_stops_every_timer() {
        let client = spawn();
        let first = client
            .start_order_ready_timer(draft("order_1", 300), 30)
            .await
            .unwrap();
        client
            .start_order_ready_timer(draft("order_2", 300), 30)
            .await
            .unwrap();

        assert_eq!(client.cancel_all().await.unwrap(), 2);
        advance(Duration::from_secs(60)).await;
        assert_eq!(client.get_order_remaining_time(first).await.unwrap(), 0);
        assert!(client.notifications().await.unwrap().order_ready.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn drafts_without_id_get_one() {
        let client = spawn();
        let mut anonymous = draft("unused", 300);
        anonymous.order_id = None;

        let first = client
            .start_order_ready_timer(anonymous.clone(), 30)
            .await
            .unwrap();
        let second = client.start_order_ready_timer(anonymous, 30).await.unwrap();
        assert!(first.as_str().starts_with("order_"));
        assert_ne!(first, second);
        assert_eq!(client.active_orders().await.unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_orders_have_no_time_left() {
        let client = spawn();
        assert_eq!(
            client
                .get_order_remaining_time(OrderId::from("order_missing"))
                .await
                .unwrap(),
            0
        );
    }
}
