//! # ActorClient Trait
//!
//! Common surface for resource-specific clients: `get` and `delete` come for free on top of the
//! wrapped `ResourceClient`, with framework errors mapped into the resource's own error type.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard CRUD operations.
///
/// # Example
///
/// ```rust
/// use canteen_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Voucher { code: String }
/// #[derive(Debug)] struct VoucherCreate { code: String }
/// #[derive(Debug)] struct VoucherUpdate;
/// #[derive(Debug)] enum VoucherAction {}
/// #[derive(Debug, thiserror::Error)] #[error("voucher error: {0}")] struct VoucherError(String);
///
/// #[async_trait]
/// impl ActorEntity for Voucher {
///     type Id = String;
///     type Create = VoucherCreate;
///     type Update = VoucherUpdate;
///     type Action = VoucherAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = VoucherError;
///
///     fn key_for(params: &VoucherCreate, _: u64) -> String { params.code.clone() }
///     fn from_create_params(code: String, _: VoucherCreate) -> Result<Self, VoucherError> {
///         Ok(Self { code })
///     }
///     async fn on_update(&mut self, _: VoucherUpdate, _: &()) -> Result<(), VoucherError> { Ok(()) }
///     async fn handle_action(&mut self, _: VoucherAction, _: &()) -> Result<(), VoucherError> { Ok(()) }
/// }
///
/// struct VoucherClient {
///     inner: ResourceClient<Voucher>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Voucher> for VoucherClient {
///     type Error = VoucherError;
///
///     fn inner(&self) -> &ResourceClient<Voucher> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         VoucherError(e.to_string())
///     }
/// }
///
/// async fn usage(client: VoucherClient) {
///     // get() and delete() are provided.
///     let _ = client.get("LUNCH50".to_string()).await;
///     let _ = client.delete("LUNCH50".to_string()).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by key.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by key.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
