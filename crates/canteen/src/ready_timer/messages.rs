//! Requests understood by the ready-timer actor.

use crate::model::{NotificationConfig, OrderDraft, OrderId, OrderReadyData};
use crate::notifications::NotificationSnapshot;
use std::time::Duration;
use tokio::sync::oneshot;

use super::ActiveOrder;

#[derive(Debug)]
pub enum TimerRequest {
    Start {
        draft: OrderDraft,
        delay: Duration,
        respond_to: oneshot::Sender<OrderId>,
    },
    Cancel {
        order_id: OrderId,
        respond_to: oneshot::Sender<bool>,
    },
    CancelAll {
        respond_to: oneshot::Sender<usize>,
    },
    RemainingSecs {
        order_id: OrderId,
        respond_to: oneshot::Sender<u64>,
    },
    ActiveOrders {
        respond_to: oneshot::Sender<Vec<ActiveOrder>>,
    },
    ShowNotification {
        config: NotificationConfig,
        respond_to: oneshot::Sender<()>,
    },
    ShowOrderReady {
        data: OrderReadyData,
        message: Option<String>,
        respond_to: oneshot::Sender<()>,
    },
    HideNotification {
        respond_to: oneshot::Sender<()>,
    },
    HideOrderReady {
        respond_to: oneshot::Sender<()>,
    },
    Notifications {
        respond_to: oneshot::Sender<NotificationSnapshot>,
    },
    /// Sent by a timer task when its delay has elapsed.
    Fired { order_id: OrderId, generation: u64 },
}
