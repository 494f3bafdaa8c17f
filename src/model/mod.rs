//! Domain types shared by the actors, the gateways and the CLI.

pub mod cart;
pub mod checkout;
pub mod catalog;
pub mod order;
pub mod session;

pub use cart::*;
pub use checkout::*;
pub use catalog::*;
pub use order::*;
pub use session::*;
