//! # Observability & Tracing
//!
//! Every actor logs its lifecycle and each request with structured fields (`entity_type`, `id`,
//! `size`, `error`). Client wrappers add `#[instrument]` spans, so a checkout shows up as one
//! hierarchy: client span, account action, timer start.
//!
//! ```bash
//! RUST_LOG=info cargo run      # one line per state change
//! RUST_LOG=debug cargo run     # full payloads on entry
//! RUST_LOG=canteen=debug,canteen_actor=info cargo run
//! ```
//!
//! With `RUST_LOG=info`, placing an order reads roughly:
//!
//! ```text
//! INFO Action ok id=gaiussegun37@gmail.com
//! INFO Timer started order_id=order_1760659200000 delay_secs=30 active=1
//! INFO Action ok id=gaiussegun37@gmail.com
//! INFO Order ready order_id=order_1760659200000
//! ```

/// Installs the global subscriber: `RUST_LOG` filtering, compact lines, no module targets.
///
/// Call once from a binary's `main`. Tests should not call it; a second global install panics.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
