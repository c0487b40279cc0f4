use super::error::CanteenError;
use crate::account_actor::{self, AccountContext, AccountError};
use crate::auth::{CredentialDirectory, Role, Session};
use crate::clients::{AccountClient, ReadyTimerClient};
use crate::config::CanteenConfig;
use crate::model::{
    Account, Allowance, Amount, Cart, Menu, Order, OrderDraft, OrderId, OrderIdClock, OrderStats,
    OrderStatus, ServeOption, TopUp,
};
use crate::ready_timer;
use crate::store::{FileStore, KeyValueStore, MemoryStore, UserRecords};
use canteen_actor::ActorClient;
use chrono::{Local, Utc};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// An order that went through checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order: Order,
    /// Id of the order-ready timer, or `None` if it could not be started.
    pub ready_timer_id: Option<OrderId>,
}

/// Statistics across every user, for the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminOverview {
    pub stats: OrderStats,
    pub users: usize,
}

/// The canteen for one signed-in diner (or admin) at a time.
///
/// `CanteenSystem` is responsible for:
/// - **Lifecycle Management**: starting the account and ready-timer actors, stopping them on
///   [`shutdown`](Self::shutdown)
/// - **Session**: login, restore and logout against the credential directory and the store
/// - **Orchestration**: checkout spans both actors; the balance is deducted before the timer
///   starts
///
/// # Example
///
/// ```rust
/// use canteen::config::CanteenConfig;
/// use canteen::lifecycle::CanteenSystem;
/// use canteen::model::ServeOption;
///
/// #[tokio::main]
/// async fn main() -> Result<(), canteen::lifecycle::CanteenError> {
///     let mut system = CanteenSystem::new(CanteenConfig::default())?;
///     system.login("marydoe@gmail.com", "pass456").await?;
///
///     system.add_to_cart("Jollof Rice", 1).await?;
///     system.add_to_cart("Grilled Fish", 1).await?;
///     system.set_serve_option(ServeOption::Takeout).await?;
///     let placed = system.place_order().await?;
///     assert_eq!(placed.order.total, 800);
///     assert_eq!(system.allowance().await?.remaining, 1700);
///
///     system.logout().await?;
///     system.shutdown().await
/// }
/// ```
pub struct CanteenSystem {
    /// Client for the Account actor
    pub account_client: AccountClient,

    /// Client for the ready-timer actor (timers and notifications)
    pub ready_timer_client: ReadyTimerClient,

    records: UserRecords,
    directory: CredentialDirectory,
    menu: Menu,
    config: CanteenConfig,
    session: Option<Session>,
    order_ids: Arc<OrderIdClock>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CanteenSystem {
    /// Starts the system on the store `config` asks for: files under `data_dir`, or memory.
    pub fn new(config: CanteenConfig) -> Result<Self, CanteenError> {
        let store: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileStore::open(dir)?),
            None => Arc::new(MemoryStore::new()),
        };
        Ok(Self::with_store(config, store))
    }

    /// Starts the system on an existing store.
    pub fn with_store(config: CanteenConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let records = UserRecords::new(store);

        // 1. Create actors
        let (account_actor, account_client) = account_actor::new(config.channel_buffer);
        let order_ids = Arc::new(OrderIdClock::default());
        let (timer_actor, ready_timer_client) =
            ready_timer::new(config.channel_buffer, order_ids.clone());

        // 2. Start them; the account actor gets the store through its context
        let account_handle = tokio::spawn(account_actor.run(AccountContext {
            records: records.clone(),
            default_allowance: config.default_allowance,
        }));
        let timer_handle = tokio::spawn(timer_actor.run());

        Self {
            account_client: AccountClient::new(account_client),
            ready_timer_client,
            records,
            directory: CredentialDirectory::canteen(),
            menu: Menu::food_court(),
            config,
            session: None,
            order_ids,
            handles: vec![account_handle, timer_handle],
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn config(&self) -> &CanteenConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn email(&self) -> Result<String, CanteenError> {
        self.session
            .as_ref()
            .map(|session| session.email.clone())
            .ok_or(CanteenError::NotLoggedIn)
    }

    /// The current session, provided it carries `role`.
    pub fn require_role(&self, role: Role) -> Result<&Session, CanteenError> {
        match &self.session {
            None => Err(CanteenError::NotLoggedIn),
            Some(session) if session.role == role => Ok(session),
            Some(_) => Err(CanteenError::Forbidden { required: role }),
        }
    }

    // --- Session ---

    /// Checks the credentials, saves the session and loads the user's account.
    ///
    /// Logging in as someone else first logs the current user out.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session, CanteenError> {
        let Some(credential) = self.directory.authenticate(email, password) else {
            warn!("Login rejected");
            return Err(CanteenError::InvalidCredentials);
        };
        let session = credential.session();

        if self
            .session
            .as_ref()
            .is_some_and(|current| current.email != session.email)
        {
            self.logout().await?;
        }

        self.records.save_session(&session)?;
        self.account_client.load_account(&session.email).await?;
        info!(email = %session.email, role = %session.role, "Logged in");
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Picks up the session saved by an earlier run, if there is one.
    #[instrument(skip(self))]
    pub async fn restore_session(&mut self) -> Result<Option<Session>, CanteenError> {
        let Some(session) = self.records.load_session()? else {
            return Ok(None);
        };
        self.account_client.load_account(&session.email).await?;
        info!(email = %session.email, "Session restored");
        self.session = Some(session.clone());
        Ok(Some(session))
    }

    /// Ends the session: pending timers are abandoned and notifications cleared.
    ///
    /// The user's stored record is kept unless `purge_on_logout` is set.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<(), CanteenError> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };

        let abandoned = self.ready_timer_client.cancel_all().await?;
        self.ready_timer_client.hide_notification().await?;
        self.ready_timer_client.hide_order_ready_notification().await?;
        self.records.clear_session()?;

        match self.account_client.delete(session.email.clone()).await {
            Ok(()) | Err(AccountError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }
        if self.config.purge_on_logout {
            self.records.remove(&session.email)?;
        }

        info!(email = %session.email, abandoned, "Logged out");
        Ok(())
    }

    // --- Account ---

    pub async fn account(&self) -> Result<Account, CanteenError> {
        Ok(self.account_client.account(self.email()?).await?)
    }

    pub async fn allowance(&self) -> Result<Allowance, CanteenError> {
        Ok(self.account().await?.allowance)
    }

    pub async fn top_up_history(&self) -> Result<Vec<TopUp>, CanteenError> {
        Ok(self.account().await?.top_ups)
    }

    // --- Cart ---

    pub async fn add_to_cart(&self, name: &str, quantity: u32) -> Result<Cart, CanteenError> {
        let item = self
            .menu
            .find(name)
            .cloned()
            .ok_or_else(|| CanteenError::UnknownMenuItem(name.to_string()))?;
        Ok(self
            .account_client
            .add_to_cart(self.email()?, item, quantity)
            .await?)
    }

    /// Adds a dish in the quantity picked on its menu card.
    pub async fn add_selected_to_cart(&self, name: &str) -> Result<Cart, CanteenError> {
        let quantity = self.account().await?.selected_quantity(name);
        self.add_to_cart(name, quantity).await
    }

    pub async fn select_quantity(&self, name: &str, quantity: u32) -> Result<u32, CanteenError> {
        if self.menu.find(name).is_none() {
            return Err(CanteenError::UnknownMenuItem(name.to_string()));
        }
        Ok(self
            .account_client
            .select_quantity(self.email()?, name.to_string(), quantity)
            .await?)
    }

    pub async fn set_cart_quantity(&self, name: &str, quantity: u32) -> Result<Cart, CanteenError> {
        Ok(self
            .account_client
            .set_cart_quantity(self.email()?, name.to_string(), quantity)
            .await?)
    }

    pub async fn remove_from_cart(&self, name: &str) -> Result<Cart, CanteenError> {
        Ok(self
            .account_client
            .remove_from_cart(self.email()?, name.to_string())
            .await?)
    }

    pub async fn reset_cart(&self) -> Result<(), CanteenError> {
        Ok(self.account_client.reset_cart(self.email()?).await?)
    }

    pub async fn set_serve_option(&self, serve_option: ServeOption) -> Result<(), CanteenError> {
        self.account_client
            .set_serve_option(self.email()?, serve_option)
            .await?;
        Ok(())
    }

    pub async fn cart_total(&self) -> Result<Amount, CanteenError> {
        Ok(self.account().await?.cart.total())
    }

    /// Refills the cart with a past order's items and serve option.
    pub async fn reorder(&self, index: usize) -> Result<Cart, CanteenError> {
        let order = self.order(index).await?;
        Ok(self
            .account_client
            .replace_cart(self.email()?, order.items, order.serve_option)
            .await?)
    }

    // --- Allowance & checkout ---

    /// Deducts `total` and, given a draft, starts its ready timer.
    ///
    /// A draft whose lines do not sum to `total` is rejected before anything is deducted. Once
    /// the deduction succeeds it stands: a timer that fails to start is logged and reported as
    /// `Ok(None)`.
    #[instrument(skip(self, draft))]
    pub async fn complete_order_and_deduct_balance(
        &self,
        total: Amount,
        draft: Option<OrderDraft>,
    ) -> Result<Option<OrderId>, CanteenError> {
        let email = self.email()?;
        if let Some(draft) = &draft {
            let computed = draft.items_total();
            if computed != total {
                return Err(AccountError::TotalMismatch {
                    declared: total,
                    computed,
                }
                .into());
            }
        }

        let remaining = self.account_client.deduct(email, total).await?;
        info!(total, remaining, "Balance deducted");

        let Some(draft) = draft else {
            return Ok(None);
        };
        match self
            .ready_timer_client
            .start_order_ready_timer(draft, self.config.ready_delay_secs)
            .await
        {
            Ok(order_id) => Ok(Some(order_id)),
            Err(e) => {
                error!(error = %e, "Order-ready timer failed to start");
                Ok(None)
            }
        }
    }

    /// Checks out the cart: pays for it, starts its timer, records it and empties the cart.
    #[instrument(skip(self))]
    pub async fn place_order(&self) -> Result<PlacedOrder, CanteenError> {
        let email = self.email()?;
        let account = self.account_client.account(email.clone()).await?;
        if account.cart.is_empty() {
            return Err(CanteenError::EmptyCart);
        }
        let serve_option = account
            .serve_option
            .ok_or(CanteenError::MissingServeOption)?;

        let order_id = self.order_ids.next_id();
        let draft =
            OrderDraft::from_cart(&account.cart, Some(serve_option)).with_id(order_id.clone());
        let ready_timer_id = self
            .complete_order_and_deduct_balance(draft.total, Some(draft.clone()))
            .await?;

        let order = Order::placed(draft, order_id, &email, Utc::now());
        let order = self.account_client.record_order(email.clone(), order).await?;
        self.account_client.reset_cart(email).await?;

        info!(order_id = %order.order_id, total = order.total, "Order placed");
        Ok(PlacedOrder {
            order,
            ready_timer_id,
        })
    }

    #[instrument(skip(self))]
    pub async fn handle_add_top_up(&self, amount: Amount) -> Result<Amount, CanteenError> {
        let remaining = self.account_client.top_up(self.email()?, amount).await?;
        info!(amount, remaining, "Allowance topped up");
        Ok(remaining)
    }

    // --- History ---

    pub async fn order_history(&self) -> Result<Vec<Order>, CanteenError> {
        Ok(self.account().await?.history)
    }

    pub async fn order(&self, index: usize) -> Result<Order, CanteenError> {
        self.order_history()
            .await?
            .into_iter()
            .nth(index)
            .ok_or(CanteenError::OrderIndexOutOfRange(index))
    }

    pub async fn dashboard(&self) -> Result<OrderStats, CanteenError> {
        let history = self.order_history().await?;
        Ok(OrderStats::from_orders(&history, Local::now().date_naive()))
    }

    // --- Admin ---

    /// Every stored user's orders, newest first, each tagged with its owner.
    pub async fn admin_orders(&self) -> Result<Vec<Order>, CanteenError> {
        self.require_role(Role::Admin)?;
        let mut orders = Vec::new();
        for email in self.records.emails()? {
            for mut order in self.records.load(&email).last_ordered {
                if order.user_email.is_empty() {
                    order.user_email = email.clone();
                }
                orders.push(order);
            }
        }
        orders.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn admin_update_order_status(
        &self,
        email: &str,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, CanteenError> {
        self.require_role(Role::Admin)?;

        // A loaded account owns its history; go through the actor so it stays current.
        if self.account_client.get(email.to_string()).await?.is_some() {
            return Ok(self
                .account_client
                .set_order_status(email.to_string(), order_id.clone(), status)
                .await?);
        }

        if !self.records.emails()?.iter().any(|known| known == email) {
            return Err(AccountError::NotFound(email.to_string()).into());
        }
        let mut updated = None;
        self.records.update(email, |record| {
            if let Some(order) = record
                .last_ordered
                .iter_mut()
                .find(|order| &order.order_id == order_id)
            {
                order.status = status;
                updated = Some(order.clone());
            }
        })?;
        let order = updated.ok_or_else(|| AccountError::OrderNotFound(order_id.to_string()))?;
        info!(%status, "Order status updated");
        Ok(order)
    }

    /// Order statistics over every diner; `users` leaves out admin records.
    pub async fn admin_dashboard(&self) -> Result<AdminOverview, CanteenError> {
        let orders = self.admin_orders().await?;
        let users = self
            .records
            .emails()?
            .iter()
            .filter(|email| {
                !self
                    .directory
                    .find(email)
                    .is_some_and(|credential| credential.role == Role::Admin)
            })
            .count();
        Ok(AdminOverview {
            stats: OrderStats::from_orders(&orders, Local::now().date_naive()),
            users,
        })
    }

    // --- Lifecycle ---

    /// Stops both actors and waits for them.
    ///
    /// Pending timers are abandoned; the session is left in the store for the next start.
    pub async fn shutdown(self) -> Result<(), CanteenError> {
        info!("Shutting down canteen...");

        // Dropping the last clients closes the channels; each actor drains and exits.
        drop(self.account_client);
        drop(self.ready_timer_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(CanteenError::Shutdown(e.to_string()));
            }
        }

        info!("Canteen shutdown complete.");
        Ok(())
    }
}
