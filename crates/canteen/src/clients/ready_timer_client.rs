//! # Ready Timer Client
//!
//! Typed front for the [`ReadyTimerActor`](crate::ready_timer::ReadyTimerActor): order timers
//! and the notification board.
use crate::model::{NotificationConfig, OrderDraft, OrderId, OrderReadyData};
use crate::notifications::NotificationSnapshot;
use crate::ready_timer::messages::TimerRequest;
use crate::ready_timer::{ActiveOrder, ReadyTimerError};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ReadyTimerClient {
    sender: mpsc::Sender<TimerRequest>,
}

impl ReadyTimerClient {
    pub fn new(sender: mpsc::Sender<TimerRequest>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<R>) -> TimerRequest,
    ) -> Result<R, ReadyTimerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(build(respond_to)).await.map_err(|_| {
            ReadyTimerError::ActorCommunicationError("ready timer closed".to_string())
        })?;
        response.await.map_err(|_| {
            ReadyTimerError::ActorCommunicationError("ready timer dropped the reply".to_string())
        })
    }

    /// Starts (or restarts) the timer for `draft` and shows the order-placed notification.
    ///
    /// A draft without an id is given one derived from the current time.
    #[instrument(skip(self, draft), fields(order_id = ?draft.order_id))]
    pub async fn start_order_ready_timer(
        &self,
        draft: OrderDraft,
        delay_secs: u64,
    ) -> Result<OrderId, ReadyTimerError> {
        debug!("Sending request");
        let delay = Duration::from_secs(delay_secs);
        self.request(|respond_to| TimerRequest::Start {
            draft,
            delay,
            respond_to,
        })
        .await
    }

    /// Returns false when no timer was running for the id.
    #[instrument(skip(self))]
    pub async fn cancel_order_timer(&self, order_id: OrderId) -> Result<bool, ReadyTimerError> {
        debug!("Sending request");
        self.request(|respond_to| TimerRequest::Cancel {
            order_id,
            respond_to,
        })
        .await
    }

    /// Cancels every pending timer and returns how many there were.
    #[instrument(skip(self))]
    pub async fn cancel_all(&self) -> Result<usize, ReadyTimerError> {
        debug!("Sending request");
        self.request(|respond_to| TimerRequest::CancelAll { respond_to })
            .await
    }

    /// Whole seconds until the order is ready; 0 for unknown or finished orders.
    pub async fn get_order_remaining_time(&self, order_id: OrderId) -> Result<u64, ReadyTimerError> {
        self.request(|respond_to| TimerRequest::RemainingSecs {
            order_id,
            respond_to,
        })
        .await
    }

    pub async fn active_orders(&self) -> Result<Vec<ActiveOrder>, ReadyTimerError> {
        self.request(|respond_to| TimerRequest::ActiveOrders { respond_to })
            .await
    }

    #[instrument(skip(self, config))]
    pub async fn show_notification(
        &self,
        config: impl Into<NotificationConfig>,
    ) -> Result<(), ReadyTimerError> {
        let config = config.into();
        debug!(message = %config.message, "Sending request");
        self.request(|respond_to| TimerRequest::ShowNotification { config, respond_to })
            .await
    }

    #[instrument(skip(self, data), fields(order_id = %data.order_id))]
    pub async fn show_order_ready_notification(
        &self,
        data: OrderReadyData,
        message: Option<String>,
    ) -> Result<(), ReadyTimerError> {
        debug!("Sending request");
        self.request(|respond_to| TimerRequest::ShowOrderReady {
            data,
            message,
            respond_to,
        })
        .await
    }

    pub async fn hide_notification(&self) -> Result<(), ReadyTimerError> {
        self.request(|respond_to| TimerRequest::HideNotification { respond_to })
            .await
    }

    pub async fn hide_order_ready_notification(&self) -> Result<(), ReadyTimerError> {
        self.request(|respond_to| TimerRequest::HideOrderReady { respond_to })
            .await
    }

    /// The notifications currently visible.
    pub async fn notifications(&self) -> Result<NotificationSnapshot, ReadyTimerError> {
        self.request(|respond_to| TimerRequest::Notifications { respond_to })
            .await
    }
}
