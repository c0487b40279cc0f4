use super::messages::TimerRequest;
use super::ActiveOrder;
use crate::clients::ReadyTimerClient;
use crate::model::{
    NotificationConfig, NotificationKind, OrderDraft, OrderId, OrderIdClock, OrderReadyData,
    RESTAURANT_NAME,
};
use crate::notifications::NotificationBoard;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, warn};

struct PendingTimer {
    generation: u64,
    cancel: oneshot::Sender<()>,
}

/// Owns the active orders, their pending timers and the notification board.
///
/// Holds only a weak handle to its own channel, so it stops once every client is dropped even
/// while timers are still sleeping.
pub struct ReadyTimerActor {
    receiver: mpsc::Receiver<TimerRequest>,
    self_sender: mpsc::WeakSender<TimerRequest>,
    active: Vec<ActiveOrder>,
    timers: HashMap<OrderId, PendingTimer>,
    board: NotificationBoard,
    next_generation: u64,
    ids: Arc<OrderIdClock>,
}

impl ReadyTimerActor {
    /// `ids` hands out ids for drafts that arrive without one; share it with every other
    /// producer of order ids so the two never collide.
    pub fn new(buffer_size: usize, ids: Arc<OrderIdClock>) -> (Self, ReadyTimerClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            self_sender: sender.downgrade(),
            active: Vec::new(),
            timers: HashMap::new(),
            board: NotificationBoard::new(),
            next_generation: 0,
            ids,
        };
        (actor, ReadyTimerClient::new(sender))
    }

    pub async fn run(mut self) {
        info!("Ready timer started");
        while let Some(request) = self.receiver.recv().await {
            self.handle(request);
        }
        let abandoned = self.cancel_all();
        info!(abandoned, "Ready timer shutdown");
    }

    fn handle(&mut self, request: TimerRequest) {
        match request {
            TimerRequest::Start {
                draft,
                delay,
                respond_to,
            } => {
                let order_id = self.start(draft, delay);
                let _ = respond_to.send(order_id);
            }
            TimerRequest::Cancel {
                order_id,
                respond_to,
            } => {
                let cancelled = self.cancel(&order_id);
                let _ = respond_to.send(cancelled);
            }
            TimerRequest::CancelAll { respond_to } => {
                let _ = respond_to.send(self.cancel_all());
            }
            TimerRequest::RemainingSecs {
                order_id,
                respond_to,
            } => {
                let now = Instant::now();
                let remaining = self
                    .active
                    .iter()
                    .find(|order| order.order_id == order_id)
                    .map_or(0, |order| order.remaining_secs(now));
                let _ = respond_to.send(remaining);
            }
            TimerRequest::ActiveOrders { respond_to } => {
                let _ = respond_to.send(self.active.clone());
            }
            TimerRequest::ShowNotification { config, respond_to } => {
                self.board.show(config, Instant::now());
                let _ = respond_to.send(());
            }
            TimerRequest::ShowOrderReady {
                data,
                message,
                respond_to,
            } => {
                self.board.show_order_ready(data, message, Instant::now());
                let _ = respond_to.send(());
            }
            TimerRequest::HideNotification { respond_to } => {
                self.board.hide();
                let _ = respond_to.send(());
            }
            TimerRequest::HideOrderReady { respond_to } => {
                self.board.hide_order_ready();
                let _ = respond_to.send(());
            }
            TimerRequest::Notifications { respond_to } => {
                let _ = respond_to.send(self.board.snapshot(Instant::now()));
            }
            TimerRequest::Fired {
                order_id,
                generation,
            } => self.fired(order_id, generation),
        }
    }

    fn start(&mut self, draft: OrderDraft, delay: Duration) -> OrderId {
        let order_id = draft.order_id.clone().unwrap_or_else(|| self.ids.next_id());
        if self.cancel(&order_id) {
            debug!(%order_id, "Replacing live timer");
        }

        let now = Instant::now();
        self.active.push(ActiveOrder {
            order_id: order_id.clone(),
            items: draft.items,
            total: draft.total,
            serve_option: draft.serve_option,
            restaurant_name: draft
                .restaurant_name
                .unwrap_or_else(|| RESTAURANT_NAME.to_string()),
            started_at: now,
            delay,
        });

        self.next_generation += 1;
        let generation = self.next_generation;
        let (cancel, cancelled) = oneshot::channel();
        self.timers
            .insert(order_id.clone(), PendingTimer { generation, cancel });
        tokio::spawn(wait_then_report(
            self.self_sender.clone(),
            order_id.clone(),
            generation,
            delay,
            cancelled,
        ));

        self.board.show(
            NotificationConfig::new(format!(
                "Order placed successfully! Your food will be ready in {} seconds.",
                delay.as_secs()
            ))
            .with_kind(NotificationKind::Success),
            now,
        );
        info!(
            %order_id,
            delay_secs = delay.as_secs(),
            active = self.active.len(),
            "Timer started"
        );
        order_id
    }

    /// Forgets the order and stops its timer. Returns false for unknown ids.
    fn cancel(&mut self, order_id: &OrderId) -> bool {
        let had_order = self.remove_active(order_id).is_some();
        let had_timer = match self.timers.remove(order_id) {
            Some(timer) => {
                // The task may already have finished; a closed token is fine.
                let _ = timer.cancel.send(());
                true
            }
            None => false,
        };
        if had_order || had_timer {
            debug!(%order_id, "Timer cancelled");
        }
        had_order || had_timer
    }

    fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        for (_, timer) in self.timers.drain() {
            let _ = timer.cancel.send(());
        }
        self.active.clear();
        if count > 0 {
            info!(count, "All timers cancelled");
        }
        count
    }

    fn fired(&mut self, order_id: OrderId, generation: u64) {
        let current = self.timers.get(&order_id).map(|timer| timer.generation);
        if current != Some(generation) {
            debug!(%order_id, generation, "Ignoring stale timer");
            return;
        }
        self.timers.remove(&order_id);
        let Some(order) = self.remove_active(&order_id) else {
            warn!(%order_id, "Timer fired for an order no longer active");
            return;
        };

        info!(%order_id, "Order ready");
        self.board.show_order_ready(
            OrderReadyData {
                order_id: order.order_id,
                items: order.items,
                total: order.total,
                restaurant_name: order.restaurant_name,
            },
            None,
            Instant::now(),
        );
    }

    fn remove_active(&mut self, order_id: &OrderId) -> Option<ActiveOrder> {
        let index = self
            .active
            .iter()
            .position(|order| &order.order_id == order_id)?;
        Some(self.active.remove(index))
    }
}

async fn wait_then_report(
    actor: mpsc::WeakSender<TimerRequest>,
    order_id: OrderId,
    generation: u64,
    delay: Duration,
    cancelled: oneshot::Receiver<()>,
) {
    tokio::select! {
        _ = tokio::time::sleep(delay) => {
            if let Some(actor) = actor.upgrade() {
                let _ = actor.send(TimerRequest::Fired { order_id, generation }).await;
            }
        }
        _ = cancelled => {}
    }
}
