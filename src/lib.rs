//! # emenu
//!
//! The ordering core of a restaurant's digital menu: a customer scans the QR code at
//! their table, builds a cart from the shop's catalog, picks dine-in, takeaway or
//! delivery, and the order is submitted to the restaurant's API.
//!
//! ## Architecture
//!
//! State lives in actors. A [`ResourceActor`](framework::ResourceActor) owns every
//! entity of one kind and handles requests for them one at a time, so carts and
//! checkouts never need locks and a checkout can never submit the same cart twice.
//!
//! - [`framework`] - the generic actor, its client, and `MockClient` for tests
//! - [`cart_actor`] - cart lines keyed by product and chosen modifiers
//! - [`checkout_actor`] - the order-type / identity / submission state machine
//! - [`clients`] - typed `CartClient` and `CheckoutClient`
//! - [`lifecycle`] - [`MenuSystem`](lifecycle::MenuSystem) wiring and shutdown, log setup
//!
//! Around them:
//!
//! - [`model`] - catalog, cart, order and session types
//! - [`modifiers`] - variation / add-on selection for a product
//! - [`identity`] - the remembered customer, backed by a session store
//! - [`gateway`] - HTTP access to the catalog and order endpoints
//! - [`notifications`] - real-time order and desk events turned into alerts
//! - [`config`] - `EMENU_*` environment settings
//!
//! Dependencies are handed to an actor when it starts (`actor.run(context)`), which
//! lets tests swap the order gateway or the cart actor for fakes.

pub mod cart_actor;
pub mod checkout_actor;
pub mod clients;
pub mod config;
pub mod framework;
pub mod gateway;
pub mod identity;
pub mod lifecycle;
pub mod model;
pub mod modifiers;
pub mod notifications;
