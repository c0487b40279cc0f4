use super::{Amount, CartItem, OrderId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long a general notification stays up unless told otherwise.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(5000);
/// How long an order-ready notification stays up unless told otherwise.
pub const ORDER_READY_DURATION: Duration = Duration::from_millis(8000);
pub const ORDER_READY_MESSAGE: &str = "Your delicious food is ready for pickup!";
pub const RESTAURANT_NAME: &str = "Food Court";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
    OrderReady,
}

/// What the order-ready popup shows about the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReadyData {
    pub order_id: OrderId,
    pub items: Vec<CartItem>,
    pub total: Amount,
    pub restaurant_name: String,
}

/// A notification as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub duration: Duration,
    pub order_data: Option<OrderReadyData>,
}

/// Request to show a notification. Anything left unset falls back to an info notice shown for
/// [`DEFAULT_NOTIFICATION_DURATION`].
///
/// A bare string converts into a config, so `show_notification("Saved")` works.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationConfig {
    pub message: String,
    pub kind: Option<NotificationKind>,
    pub duration: Option<Duration>,
    pub order_data: Option<OrderReadyData>,
}

impl NotificationConfig {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_order_data(mut self, data: OrderReadyData) -> Self {
        self.order_data = Some(data);
        self
    }

    pub fn into_notification(self) -> Notification {
        Notification {
            message: self.message,
            kind: self.kind.unwrap_or_default(),
            duration: self.duration.unwrap_or(DEFAULT_NOTIFICATION_DURATION),
            order_data: self.order_data,
        }
    }
}

impl From<&str> for NotificationConfig {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for NotificationConfig {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl Notification {
    /// The order-ready notice: eight seconds, kind `OrderReady`, carrying the order.
    pub fn order_ready(data: OrderReadyData, message: Option<String>) -> Self {
        Self {
            message: message.unwrap_or_else(|| ORDER_READY_MESSAGE.to_string()),
            kind: NotificationKind::OrderReady,
            duration: ORDER_READY_DURATION,
            order_data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_message_gets_defaults() {
        let notification = NotificationConfig::from("Cart updated").into_notification();
        assert_eq!(notification.kind, NotificationKind::Info);
        assert_eq!(notification.duration, DEFAULT_NOTIFICATION_DURATION);
        assert!(notification.order_data.is_none());
    }

    #[test]
    fn order_ready_defaults_message() {
        let data = OrderReadyData {
            order_id: OrderId::from("order_1"),
            items: Vec::new(),
            total: 800,
            restaurant_name: RESTAURANT_NAME.into(),
        };
        let notification = Notification::order_ready(data, None);
        assert_eq!(notification.message, ORDER_READY_MESSAGE);
        assert_eq!(notification.kind, NotificationKind::OrderReady);
        assert_eq!(notification.duration, Duration::from_secs(8));
    }
}
