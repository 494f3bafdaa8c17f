//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod cart_client;
pub mod checkout_client;

pub use cart_client::*;
pub use checkout_client::*;
