//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber filtered by `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info emenu --shop 3 --desk 12 --order-type dine-in --product 7
//! RUST_LOG=emenu::checkout_actor=debug emenu ...   # drafts as they are submitted
//! ```
//!
//! At `info` a successful dine-in order reads roughly:
//!
//! ```text
//! INFO Created entity_type="Cart" id=cart_1 size=1
//! INFO Created entity_type="Checkout" id=checkout_1 size=1
//! INFO Known customer, placing order directly checkout=checkout_1 order_type=dine_in
//! INFO Order placed checkout=checkout_1 order_type=dine_in order_number=4821
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and checkout fields already say where
        .compact()
        .init();
}
