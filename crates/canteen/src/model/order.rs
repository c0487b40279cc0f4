use super::cart::serve_option_field;
use super::{Amount, Cart, CartItem, ServeOption};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::sync::atomic::{AtomicI64, Ordering};

/// Identifier of a placed order: `order_<unix millis>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("order_{millis}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// Older records stored the id as a bare millisecond number.
impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Millis(i64),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(id) => Self(id),
            Raw::Millis(millis) => Self(millis.to_string()),
        })
    }
}

/// Hands out order ids that never repeat, even when two orders land in the same millisecond.
#[derive(Debug, Default)]
pub struct OrderIdClock {
    last: AtomicI64,
}

impl OrderIdClock {
    pub fn next_id(&self) -> OrderId {
        let now = Utc::now().timestamp_millis();
        let previous = match self.last.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        }) {
            Ok(previous) | Err(previous) => previous,
        };
        OrderId::from_millis(now.max(previous + 1))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Placed,
    Preparing,
    #[serde(rename = "Ready for Pickup")]
    ReadyForPickup,
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Placed,
        OrderStatus::Preparing,
        OrderStatus::ReadyForPickup,
        OrderStatus::Completed,
    ];
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OrderStatus::Placed => "Placed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::ReadyForPickup => "Ready for Pickup",
            OrderStatus::Completed => "Completed",
        })
    }
}

/// A confirmed order, as kept in the diner's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub items: Vec<CartItem>,
    #[serde(default, with = "serve_option_field")]
    pub serve_option: Option<ServeOption>,
    pub total: Amount,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub user_email: String,
}

impl Order {
    /// Turns a draft into a freshly placed order. Drafts without an id get `fallback_id`.
    pub fn placed(
        draft: OrderDraft,
        fallback_id: OrderId,
        user_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id: draft.order_id.unwrap_or(fallback_id),
            items: draft.items,
            serve_option: draft.serve_option,
            total: draft.total,
            timestamp,
            status: OrderStatus::Placed,
            user_email: user_email.into(),
        }
    }

    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.timestamp.with_timezone(&Local).date_naive() == day
    }
}

/// An order about to be paid for: what the ready timer tracks and what becomes an [`Order`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub order_id: Option<OrderId>,
    pub items: Vec<CartItem>,
    pub serve_option: Option<ServeOption>,
    pub total: Amount,
    pub restaurant_name: Option<String>,
}

impl OrderDraft {
    pub fn from_cart(cart: &Cart, serve_option: Option<ServeOption>) -> Self {
        Self {
            order_id: None,
            items: cart.items().to_vec(),
            serve_option,
            total: cart.total(),
            restaurant_name: None,
        }
    }

    pub fn with_id(mut self, order_id: OrderId) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Sum of the draft's lines, independent of its declared `total`.
    pub fn items_total(&self) -> Amount {
        self.items
            .iter()
            .fold(0, |sum: Amount, line| sum.saturating_add(line.subtotal()))
    }
}

/// Count and share of orders in one status.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusBreakdown {
    pub count: usize,
    pub percentage: f64,
}

/// Aggregates shown on the dashboards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderStats {
    pub total_orders: usize,
    pub orders_today: usize,
    pub total_sales: Amount,
    pub placed: StatusBreakdown,
    pub preparing: StatusBreakdown,
    pub ready_for_pickup: StatusBreakdown,
    pub completed: StatusBreakdown,
}

impl OrderStats {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>, today: NaiveDate) -> Self {
        let mut stats = Self::default();
        for order in orders {
            stats.total_orders += 1;
            stats.total_sales = stats.total_sales.saturating_add(order.total);
            if order.is_on(today) {
                stats.orders_today += 1;
            }
            stats.breakdown_mut(order.status).count += 1;
        }
        if stats.total_orders > 0 {
            let total = stats.total_orders as f64;
            for status in OrderStatus::ALL {
                let breakdown = stats.breakdown_mut(status);
                breakdown.percentage = breakdown.count as f64 * 100.0 / total;
            }
        }
        stats
    }

    pub fn breakdown(&self, status: OrderStatus) -> StatusBreakdown {
        match status {
            OrderStatus::Placed => self.placed,
            OrderStatus::Preparing => self.preparing,
            OrderStatus::ReadyForPickup => self.ready_for_pickup,
            OrderStatus::Completed => self.completed,
        }
    }

    fn breakdown_mut(&mut self, status: OrderStatus) -> &mut StatusBreakdown {
        match status {
            OrderStatus::Placed => &mut self.placed,
            OrderStatus::Preparing => &mut self.preparing,
            OrderStatus::ReadyForPickup => &mut self.ready_for_pickup,
            OrderStatus::Completed => &mut self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn order(total: Amount, status: OrderStatus, timestamp: DateTime<Utc>) -> Order {
        Order {
            order_id: OrderId::from_millis(timestamp.timestamp_millis()),
            items: Vec::new(),
            serve_option: Some(ServeOption::Plate),
            total,
            timestamp,
            status,
            user_email: "walker123@gmail.com".into(),
        }
    }

    #[test]
    fn clock_never_repeats() {
        let clock = OrderIdClock::default();
        let ids: Vec<_> = (0..50).map(|_| clock.next_id()).collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
        assert!(ids[0].as_str().starts_with("order_"));
    }

    #[test]
    fn status_uses_display_names_on_the_wire() {
        let json = serde_json::to_string(&OrderStatus::ReadyForPickup).unwrap();
        assert_eq!(json, "\"Ready for Pickup\"");
        let parsed: OrderStatus = serde_json::from_str("\"Preparing\"").unwrap();
        assert_eq!(parsed, OrderStatus::Preparing);
    }

    #[test]
    fn legacy_records_parse() {
        let json = r#"{
            "orderId": 1760659200000,
            "items": [{"name": "Beef", "price": 400, "quantity": 2}],
            "serveOption": "plate",
            "total": 800,
            "timestamp": 1760659200000
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id, OrderId::from("1760659200000"));
        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.items[0].subtotal(), 800);
        assert!(order.user_email.is_empty());
    }

    #[test]
    fn stats_count_today_and_share_by_status() {
        let now = Utc::now();
        let today = now.with_timezone(&Local).date_naive();
        let orders = vec![
            order(800, OrderStatus::Placed, now),
            order(500, OrderStatus::Completed, now),
            order(300, OrderStatus::Completed, now - Duration::days(3)),
            order(600, OrderStatus::Preparing, now - Duration::days(9)),
        ];

        let stats = OrderStats::from_orders(&orders, today);
        assert_eq!(stats.total_orders, 4);
        assert_eq!(stats.orders_today, 2);
        assert_eq!(stats.total_sales, 2200);
        assert_eq!(stats.breakdown(OrderStatus::Completed).count, 2);
        assert_eq!(stats.breakdown(OrderStatus::Completed).percentage, 50.0);
        assert_eq!(stats.breakdown(OrderStatus::ReadyForPickup).percentage, 0.0);
    }

    #[test]
    fn draft_total_is_independent_of_lines() {
        let draft = OrderDraft {
            order_id: None,
            items: vec![CartItem {
                name: "Grilled Fish".into(),
                price: 300,
                quantity: 2,
                image: String::new(),
            }],
            serve_option: None,
            total: 700,
            restaurant_name: None,
        };
        assert_eq!(draft.items_total(), 600);
    }
}
