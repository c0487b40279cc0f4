use canteen::account_actor::{self, AccountContext, AccountError};
use canteen::clients::AccountClient;
use canteen::model::{Menu, OrderStatus, ServeOption};
use canteen::store::{KeyValueStore, MemoryStore, StoreError, UserRecords};
use canteen_actor::ActorClient;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Store that counts writes and can be switched to fail them.
#[derive(Default)]
struct RecordingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
    failing: std::sync::atomic::AtomicBool,
}

impl KeyValueStore for RecordingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.inner.keys()
    }
}

fn spawn_account_actor(store: Arc<RecordingStore>) -> AccountClient {
    let (actor, generic_client) = account_actor::new(8);
    tokio::spawn(actor.run(AccountContext {
        records: UserRecords::new(store),
        default_allowance: 2500,
    }));
    AccountClient::new(generic_client)
}

/// Real Account actor with an instrumented store behind it.
#[tokio::test]
async fn test_every_change_is_written_through() {
    let store = Arc::new(RecordingStore::default());
    let client = spawn_account_actor(store.clone());
    let menu = Menu::food_court();

    let email = client.load_account("walker123@gmail.com").await.unwrap();
    assert_eq!(store.writes.load(Ordering::SeqCst), 1);

    client
        .add_to_cart(email.clone(), menu.find("Beef").cloned().unwrap(), 2)
        .await
        .unwrap();
    client
        .set_serve_option(email.clone(), ServeOption::Plate)
        .await
        .unwrap();
    client.deduct(email.clone(), 800).await.unwrap();
    assert_eq!(store.writes.load(Ordering::SeqCst), 4);

    // Rejected actions do not write
    let err = client.deduct(email.clone(), 5000).await.unwrap_err();
    assert!(matches!(err, AccountError::InsufficientBalance { .. }));
    assert_eq!(store.writes.load(Ordering::SeqCst), 4);

    let stored = UserRecords::new(store.clone()).load(&email);
    assert_eq!(stored.remaining_allowance, Some(1700));
    assert_eq!(stored.serve_option, Some(ServeOption::Plate));
    assert_eq!(stored.cart.len(), 1);
}

#[tokio::test]
async fn test_failed_writes_do_not_undo_changes() {
    let store = Arc::new(RecordingStore::default());
    let client = spawn_account_actor(store.clone());
    let email = client.load_account("marydoe@gmail.com").await.unwrap();

    store.failing.store(true, Ordering::SeqCst);
    assert_eq!(client.top_up(email.clone(), 500).await, Ok(3000));

    let account = client.account(email.clone()).await.unwrap();
    assert_eq!(account.allowance.remaining, 3000);
    assert_eq!(account.top_ups.len(), 1);

    // The store still holds the state from before the failure
    let stored = UserRecords::new(store.clone()).load(&email);
    assert_eq!(stored.remaining_allowance, Some(2500));
}

#[tokio::test]
async fn test_order_status_changes_and_unload() {
    let store = Arc::new(RecordingStore::default());
    let client = spawn_account_actor(store.clone());
    let email = client.load_account("gaiussegun37@gmail.com").await.unwrap();

    let order = canteen::model::Order::placed(
        canteen::model::OrderDraft {
            order_id: Some("order_42".into()),
            items: Vec::new(),
            serve_option: Some(ServeOption::Takeout),
            total: 0,
            restaurant_name: None,
        },
        "unused".into(),
        email.clone(),
        chrono::Utc::now(),
    );
    client.record_order(email.clone(), order).await.unwrap();

    let updated = client
        .set_order_status(email.clone(), "order_42".into(), OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Completed);

    client.delete(email.clone()).await.unwrap();
    assert!(client.get(email.clone()).await.unwrap().is_none());
    assert!(matches!(
        client.deduct(email.clone(), 100).await,
        Err(AccountError::NotFound(_))
    ));

    // Reloading picks the history back up from the store
    client.load_account(&email).await.unwrap();
    let account = client.account(email).await.unwrap();
    assert_eq!(account.history[0].status, OrderStatus::Completed);
}
