//! [`ActorEntity`] implementation for [`Account`].
//!
//! The account is hydrated from the user's record in `on_create` and written back after every
//! mutating action. A failed write is logged and does not fail the action: the in-memory
//! account stays authoritative for the session.

use super::actions::{AccountAction, AccountActionResult};
use super::error::AccountError;
use crate::model::{Account, AccountCreate, AccountUpdate, Amount, TopUp};
use crate::store::UserRecords;
use async_trait::async_trait;
use canteen_actor::ActorEntity;
use chrono::Utc;
use tracing::{debug, warn};

/// Dependencies injected into the account actor.
#[derive(Clone)]
pub struct AccountContext {
    pub records: UserRecords,
    pub default_allowance: Amount,
}

impl Account {
    fn persist(&self, ctx: &AccountContext) {
        if let Err(e) = ctx.records.update(&self.email, |record| self.write_into(record)) {
            warn!(email = %self.email, error = %e, "Failed to persist account");
        }
    }
}

#[async_trait]
impl ActorEntity for Account {
    type Id = String;
    type Create = AccountCreate;
    type Update = AccountUpdate;
    type Action = AccountAction;
    type ActionResult = AccountActionResult;
    type Context = AccountContext;
    type Error = AccountError;

    fn key_for(params: &AccountCreate, _seq: u64) -> String {
        params.email.clone()
    }

    fn from_create_params(email: String, _params: AccountCreate) -> Result<Self, AccountError> {
        Ok(Self::new(email, 0))
    }

    /// Loads the stored record; a user seen for the first time gets the default allowance.
    async fn on_create(&mut self, ctx: &AccountContext) -> Result<(), AccountError> {
        let record = ctx.records.load(&self.email);
        *self = Account::from_record(self.email.clone(), record, ctx.default_allowance);
        debug!(
            email = %self.email,
            remaining = self.allowance.remaining,
            orders = self.history.len(),
            "Account hydrated"
        );
        self.persist(ctx);
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: AccountUpdate,
        ctx: &AccountContext,
    ) -> Result<(), AccountError> {
        if let Some(serve_option) = update.serve_option {
            self.serve_option = Some(serve_option);
        }
        self.persist(ctx);
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: AccountAction,
        ctx: &AccountContext,
    ) -> Result<AccountActionResult, AccountError> {
        let result = match action {
            AccountAction::AddToCart { item, quantity } => {
                if !item.is_available() {
                    return Err(AccountError::ItemUnavailable(item.name));
                }
                if quantity == 0 {
                    return Err(AccountError::InvalidQuantity(quantity));
                }
                self.cart.add(&item, quantity);
                AccountActionResult::AddToCart(self.cart.clone())
            }
            AccountAction::SetCartQuantity { name, quantity } => {
                if !self.cart.set_quantity(&name, quantity) {
                    return Err(AccountError::NotInCart(name));
                }
                AccountActionResult::SetCartQuantity(self.cart.clone())
            }
            AccountAction::RemoveFromCart { name } => {
                if !self.cart.remove(&name) {
                    return Err(AccountError::NotInCart(name));
                }
                AccountActionResult::RemoveFromCart(self.cart.clone())
            }
            AccountAction::ReplaceCart {
                items,
                serve_option,
            } => {
                self.cart = crate::model::Cart::from_items(items);
                self.serve_option = serve_option;
                AccountActionResult::ReplaceCart(self.cart.clone())
            }
            AccountAction::SelectQuantity { name, quantity } => {
                if quantity == 0 {
                    return Err(AccountError::InvalidQuantity(quantity));
                }
                self.quantities.insert(name, quantity);
                AccountActionResult::SelectQuantity(quantity)
            }
            AccountAction::ResetCart => {
                self.cart.clear();
                self.serve_option = None;
                self.quantities.clear();
                AccountActionResult::ResetCart(())
            }
            AccountAction::Deduct(total) => {
                let remaining = self.allowance.deduct(total)?;
                AccountActionResult::Deduct(remaining)
            }
            AccountAction::TopUp(amount) => {
                let remaining = self.allowance.top_up(amount);
                if amount > 0 {
                    self.top_ups.push(TopUp {
                        amount,
                        timestamp: Utc::now(),
                    });
                }
                AccountActionResult::TopUp(remaining)
            }
            AccountAction::RecordOrder(order) => {
                self.history.push(order.clone());
                AccountActionResult::RecordOrder(order)
            }
            AccountAction::SetOrderStatus { order_id, status } => {
                let order = self
                    .history
                    .iter_mut()
                    .find(|order| order.order_id == order_id)
                    .ok_or_else(|| AccountError::OrderNotFound(order_id.to_string()))?;
                order.status = status;
                AccountActionResult::SetOrderStatus(order.clone())
            }
        };
        self.persist(ctx);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Menu, OrderStatus};
    use crate::store::{KeyValueStore, MemoryStore};
    use canteen_actor::{FrameworkError, ResourceActor, ResourceClient};
    use std::sync::Arc;

    fn spawn_accounts(store: Arc<MemoryStore>) -> ResourceClient<Account> {
        let (actor, client) = ResourceActor::<Account>::new(8);
        tokio::spawn(actor.run(AccountContext {
            records: UserRecords::new(store),
            default_allowance: 2500,
        }));
        client
    }

    async fn act(
        client: &ResourceClient<Account>,
        action: AccountAction,
    ) -> Result<AccountActionResult, AccountError> {
        client
            .perform_action("marydoe@gmail.com".into(), action)
            .await
            .map_err(|e: FrameworkError| e.into_entity_error::<AccountError>().unwrap())
    }

    #[tokio::test]
    async fn new_account_starts_with_default_allowance_and_is_persisted() {
        let store = Arc::new(MemoryStore::new());
        let client = spawn_accounts(store.clone());

        let email = client
            .create(AccountCreate {
                email: "marydoe@gmail.com".into(),
            })
            .await
            .unwrap();
        let account = client.get(email).await.unwrap().unwrap();
        assert_eq!(account.allowance.remaining, 2500);

        let raw = store.get("userData_marydoe@gmail.com").unwrap().unwrap();
        assert!(raw.contains("\"remainingAllowance\":2500"));
    }

    #[tokio::test]
    async fn unavailable_items_never_reach_the_cart() {
        let client = spawn_accounts(Arc::new(MemoryStore::new()));
        client
            .create(AccountCreate {
                email: "marydoe@gmail.com".into(),
            })
            .await
            .unwrap();
        let menu = Menu::food_court();

        let err = act(
            &client,
            AccountAction::AddToCart {
                item: menu.find("Amala & Ewedu").cloned().unwrap(),
                quantity: 1,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err, AccountError::ItemUnavailable("Amala & Ewedu".into()));

        let err = act(
            &client,
            AccountAction::AddToCart {
                item: menu.find("Beef").cloned().unwrap(),
                quantity: 0,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err, AccountError::InvalidQuantity(0));
    }

    #[tokio::test]
    async fn deduction_beyond_balance_changes_nothing() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                "userData_marydoe@gmail.com",
                r#"{"totalAllowance":2500,"remainingAllowance":300}"#,
            )
            .unwrap();
        let client = spawn_accounts(store);
        client
            .create(AccountCreate {
                email: "marydoe@gmail.com".into(),
            })
            .await
            .unwrap();

        let err = act(&client, AccountAction::Deduct(400)).await.unwrap_err();
        assert_eq!(
            err,
            AccountError::InsufficientBalance {
                requested: 400,
                available: 300
            }
        );
        assert!(matches!(
            act(&client, AccountAction::Deduct(300)).await,
            Ok(AccountActionResult::Deduct(0))
        ));
    }

    #[tokio::test]
    async fn unknown_order_status_change_is_rejected() {
        let client = spawn_accounts(Arc::new(MemoryStore::new()));
        client
            .create(AccountCreate {
                email: "marydoe@gmail.com".into(),
            })
            .await
            .unwrap();

        let err = act(
            &client,
            AccountAction::SetOrderStatus {
                order_id: "order_1".into(),
                status: OrderStatus::Completed,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err, AccountError::OrderNotFound("order_1".into()));
    }
}
