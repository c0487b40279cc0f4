//! # Account Client
//!
//! Wraps a `ResourceClient<Account>` with one method per account action. Entity errors come back
//! as the [`AccountError`] the actor raised; plumbing failures map to
//! [`AccountError::ActorCommunicationError`].
use crate::account_actor::{AccountAction, AccountActionResult, AccountError};
use crate::model::{
    Account, AccountCreate, AccountUpdate, Amount, Cart, CartItem, MenuItem, Order, OrderId,
    OrderStatus, ServeOption,
};
use async_trait::async_trait;
use canteen_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Account>,
}

#[async_trait]
impl ActorClient<Account> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &ResourceClient<Account> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into_entity_error::<AccountError>()
            .unwrap_or_else(|e| match e {
                FrameworkError::NotFound(email) => AccountError::NotFound(email),
                other => AccountError::ActorCommunicationError(other.to_string()),
            })
    }
}

macro_rules! expect_result {
    ($result:expr, $variant:ident) => {
        match $result {
            Ok(AccountActionResult::$variant(value)) => Ok(value),
            Ok(other) => Err(AccountError::UnexpectedResult(format!("{other:?}"))),
            Err(e) => Err(Self::map_error(e)),
        }
    };
}

impl AccountClient {
    pub fn new(inner: ResourceClient<Account>) -> Self {
        Self { inner }
    }

    /// Loads the account for `email` into the actor, hydrating it from storage.
    ///
    /// Loading an account that is already loaded is not an error.
    #[instrument(skip(self))]
    pub async fn load_account(&self, email: &str) -> Result<String, AccountError> {
        debug!("Sending request");
        match self
            .inner
            .create(AccountCreate {
                email: email.to_string(),
            })
            .await
        {
            Ok(email) => Ok(email),
            Err(FrameworkError::AlreadyExists(email)) => Ok(email),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Fetches an account, failing if it is not loaded.
    pub async fn account(&self, email: String) -> Result<Account, AccountError> {
        self.get(email.clone())
            .await?
            .ok_or(AccountError::NotFound(email))
    }

    #[instrument(skip(self))]
    pub async fn set_serve_option(
        &self,
        email: String,
        serve_option: ServeOption,
    ) -> Result<Account, AccountError> {
        debug!("Sending request");
        self.inner
            .update(
                email,
                AccountUpdate {
                    serve_option: Some(serve_option),
                },
            )
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, item), fields(item = %item.name))]
    pub async fn add_to_cart(
        &self,
        email: String,
        item: MenuItem,
        quantity: u32,
    ) -> Result<Cart, AccountError> {
        debug!("Sending request");
        let result = self
            .inner
            .perform_action(email, AccountAction::AddToCart { item, quantity })
            .await;
        expect_result!(result, AddToCart)
    }

    #[instrument(skip(self))]
    pub async fn set_cart_quantity(
        &self,
        email: String,
        name: String,
        quantity: u32,
    ) -> Result<Cart, AccountError> {
        debug!("Sending request");
        let result = self
            .inner
            .perform_action(email, AccountAction::SetCartQuantity { name, quantity })
            .await;
        expect_result!(result, SetCartQuantity)
    }

    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, email: String, name: String) -> Result<Cart, AccountError> {
        debug!("Sending request");
        let result = self
            .inner
            .perform_action(email, AccountAction::RemoveFromCart { name })
            .await;
        expect_result!(result, RemoveFromCart)
    }

    #[instrument(skip(self, items))]
    pub async fn replace_cart(
        &self,
        email: String,
        items: Vec<CartItem>,
        serve_option: Option<ServeOption>,
    ) -> Result<Cart, AccountError> {
        debug!("Sending request");
        let result = self
            .inner
            .perform_action(
                email,
                AccountAction::ReplaceCart {
                    items,
                    serve_option,
                },
            )
            .await;
        expect_result!(result, ReplaceCart)
    }

    #[instrument(skip(self))]
    pub async fn select_quantity(
        &self,
        email: String,
        name: String,
        quantity: u32,
    ) -> Result<u32, AccountError> {
        debug!("Sending request");
        let result = self
            .inner
            .perform_action(email, AccountAction::SelectQuantity { name, quantity })
            .await;
        expect_result!(result, SelectQuantity)
    }

    #[instrument(skip(self))]
    pub async fn reset_cart(&self, email: String) -> Result<(), AccountError> {
        debug!("Sending request");
        let result = self
            .inner
            .perform_action(email, AccountAction::ResetCart)
            .await;
        expect_result!(result, ResetCart)
    }

    /// Deducts `total` from the remaining allowance and returns what is left.
    #[instrument(skip(self))]
    pub async fn deduct(&self, email: String, total: Amount) -> Result<Amount, AccountError> {
        debug!("Sending request");
        let result = self
            .inner
            .perform_action(email, AccountAction::Deduct(total))
            .await;
        expect_result!(result, Deduct)
    }

    /// Adds `amount` to the remaining allowance and returns the new balance.
    #[instrument(skip(self))]
    pub async fn top_up(&self, email: String, amount: Amount) -> Result<Amount, AccountError> {
        debug!("Sending request");
        let result = self
            .inner
            .perform_action(email, AccountAction::TopUp(amount))
            .await;
        expect_result!(result, TopUp)
    }

    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn record_order(&self, email: String, order: Order) -> Result<Order, AccountError> {
        debug!("Sending request");
        let result = self
            .inner
            .perform_action(email, AccountAction::RecordOrder(order))
            .await;
        expect_result!(result, RecordOrder)
    }

    #[instrument(skip(self))]
    pub async fn set_order_status(
        &self,
        email: String,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, AccountError> {
        debug!("Sending request");
        let result = self
            .inner
            .perform_action(email, AccountAction::SetOrderStatus { order_id, status })
            .await;
        expect_result!(result, SetOrderStatus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canteen_actor::mock::{create_mock_client, expect_action, MockClient};

    const EMAIL: &str = "gaiussegun37@gmail.com";

    #[tokio::test]
    async fn deduct_returns_remaining_balance() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_action(EMAIL.to_string())
            .return_ok(AccountActionResult::Deduct(1700));

        let client = AccountClient::new(mock.client());
        assert_eq!(client.deduct(EMAIL.to_string(), 800).await, Ok(1700));
        mock.verify();
    }

    #[tokio::test]
    async fn entity_errors_keep_their_type() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_action(EMAIL.to_string())
            .return_err(FrameworkError::EntityError(Box::new(
                AccountError::InsufficientBalance {
                    requested: 3000,
                    available: 2500,
                },
            )));
        mock.expect_action(EMAIL.to_string())
            .return_err(FrameworkError::NotFound(EMAIL.to_string()));
        mock.expect_action(EMAIL.to_string())
            .return_err(FrameworkError::ActorClosed);

        let client = AccountClient::new(mock.client());
        assert_eq!(
            client.deduct(EMAIL.to_string(), 3000).await,
            Err(AccountError::InsufficientBalance {
                requested: 3000,
                available: 2500
            })
        );
        assert_eq!(
            client.top_up(EMAIL.to_string(), 500).await,
            Err(AccountError::NotFound(EMAIL.to_string()))
        );
        assert!(matches!(
            client.reset_cart(EMAIL.to_string()).await,
            Err(AccountError::ActorCommunicationError(_))
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn mismatched_result_is_reported_not_panicked() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_action(EMAIL.to_string())
            .return_ok(AccountActionResult::ResetCart(()));

        let client = AccountClient::new(mock.client());
        assert!(matches!(
            client.top_up(EMAIL.to_string(), 500).await,
            Err(AccountError::UnexpectedResult(_))
        ));
    }

    #[tokio::test]
    async fn top_up_sends_the_amount() {
        let (generic, mut receiver) = create_mock_client::<Account>(4);
        let client = AccountClient::new(generic);

        let call = tokio::spawn(async move { client.top_up(EMAIL.to_string(), 500).await });

        let (email, action, respond_to) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(email, EMAIL);
        assert!(matches!(action, AccountAction::TopUp(500)));
        respond_to
            .send(Ok(AccountActionResult::TopUp(2200)))
            .unwrap();

        assert_eq!(call.await.unwrap(), Ok(2200));
    }

    #[tokio::test]
    async fn loading_twice_is_fine() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_create().return_ok(EMAIL.to_string());
        mock.expect_create()
            .return_err(FrameworkError::AlreadyExists(EMAIL.to_string()));

        let client = AccountClient::new(mock.client());
        assert_eq!(client.load_account(EMAIL).await.unwrap(), EMAIL);
        assert_eq!(client.load_account(EMAIL).await.unwrap(), EMAIL);
        mock.verify();
    }
}
