use canteen::config::CanteenConfig;
use canteen::lifecycle::{CanteenError, CanteenSystem};
use canteen::model::ServeOption;
use canteen_actor::tracing::setup_tracing;
use std::time::Duration;
use tracing::{error, info, Instrument};

const DEMO_EMAIL: &str = "gaiussegun37@gmail.com";
const DEMO_PASSWORD: &str = "gesundheit.555";

#[tokio::main]
async fn main() -> Result<(), CanteenError> {
    setup_tracing();

    let config = CanteenConfig::from_env();
    info!(?config, "Starting canteen");
    let mut system = CanteenSystem::new(config)?;

    let session = match system.restore_session().await? {
        Some(session) => session,
        None => system.login(DEMO_EMAIL, DEMO_PASSWORD).await?,
    };
    info!(email = %session.email, role = %session.role, "Signed in");

    let span = tracing::info_span!("checkout", email = %session.email);
    let placed = async {
        system.select_quantity("Jollof Rice", 2).await?;
        system.add_selected_to_cart("Jollof Rice").await?;
        system.add_to_cart("Beef", 1).await?;
        system.set_serve_option(ServeOption::Plate).await?;
        info!(total = system.cart_total().await?, "Cart ready");
        system.place_order().await
    }
    .instrument(span)
    .await;

    match placed {
        Ok(placed) => {
            info!(order_id = %placed.order.order_id, total = placed.order.total, "Order placed");
            if let Some(order_id) = placed.ready_timer_id {
                wait_for_pickup(&system, order_id).await?;
            }
        }
        Err(e) if e.is_insufficient_balance() => {
            let remaining = system.allowance().await?.remaining;
            error!(remaining, "Not enough allowance left for this order");
        }
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    let remaining = system.handle_add_top_up(500).await?;
    info!(remaining, "Topped up");

    let stats = system.dashboard().await?;
    info!(
        orders = stats.total_orders,
        today = stats.orders_today,
        sales = stats.total_sales,
        "Dashboard"
    );

    system.logout().await?;
    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}

/// Polls the countdown once a second, the way a countdown badge would.
async fn wait_for_pickup(
    system: &CanteenSystem,
    order_id: canteen::model::OrderId,
) -> Result<(), CanteenError> {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        ticker.tick().await;
        let remaining = system
            .ready_timer_client
            .get_order_remaining_time(order_id.clone())
            .await?;
        if remaining == 0 {
            break;
        }
        info!(%order_id, remaining, "Preparing");
    }

    // The ready notice appears once the timer task reports back.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let notifications = system.ready_timer_client.notifications().await?;
    if let Some(ready) = notifications.order_ready {
        info!(message = %ready.message, "Pickup");
    }
    Ok(())
}
