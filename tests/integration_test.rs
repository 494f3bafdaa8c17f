mod common;

use common::{burger, pizza, sara, shop, FakeGateway, Reply};
use emenu::cart_actor::CartError;
use emenu::checkout_actor::{CheckoutError, CheckoutStep, RETRY_MESSAGE};
use emenu::config::Config;
use emenu::framework::ActorClient;
use emenu::identity::IdentityMemo;
use emenu::lifecycle::{MenuSession, MenuSystem};
use emenu::model::{
    BusinessInfo, CheckoutState, CustomerDetails, DeskNumber, FormField, Fulfillment, LineKey,
    Modifier, OrderType,
};
use emenu::modifiers::{ModifierSelection, SelectionError};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

fn config() -> Config {
    Config::from_lookup(|_| None).unwrap()
}

async fn start(gateway: Arc<FakeGateway>, identity: IdentityMemo) -> (MenuSystem, MenuSession) {
    let system = MenuSystem::new(gateway, identity, &config());
    let session = system
        .open_session(&shop(), DeskNumber::new(12))
        .await
        .expect("Failed to open session");
    (system, session)
}

/// Full end-to-end test with the real cart and checkout actors.
#[tokio::test]
async fn test_cart_total_with_addon() {
    let (system, session) = start(FakeGateway::answering("1"), IdentityMemo::in_memory()).await;

    let mut selection = ModifierSelection::resolve(&pizza(), None).unwrap();
    selection.toggle_addon(0);
    let modifiers = selection.finalize().unwrap();
    assert_eq!(modifiers[0].name, "Small");

    let line = system
        .cart_client
        .add(session.cart_id, pizza(), modifiers)
        .await
        .unwrap();
    system.cart_client.increase(session.cart_id, line.key.clone()).await.unwrap();
    system.cart_client.increase(session.cart_id, line.key.clone()).await.unwrap();

    assert_eq!(system.cart_client.total(session.cart_id).await.unwrap(), dec!(37.50));

    // Same product, different variation: its own line.
    system
        .cart_client
        .add(session.cart_id, pizza(), vec![Modifier::variation("Large")])
        .await
        .unwrap();
    let cart = system.cart_client.snapshot(session.cart_id).await.unwrap();
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.line(&line.key).unwrap().quantity, 3);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_increase_then_decrease_restores_quantity() {
    let (system, session) = start(FakeGateway::answering("1"), IdentityMemo::in_memory()).await;
    let key = LineKey::from(burger().id);

    system.cart_client.add(session.cart_id, burger(), vec![]).await.unwrap();
    assert_eq!(system.cart_client.increase(session.cart_id, key.clone()).await.unwrap(), Some(2));
    assert_eq!(system.cart_client.decrease(session.cart_id, key.clone()).await.unwrap(), Some(1));

    // From 1 the line goes away rather than sitting at 0.
    assert_eq!(system.cart_client.decrease(session.cart_id, key.clone()).await.unwrap(), Some(0));
    assert!(system.cart_client.snapshot(session.cart_id).await.unwrap().is_empty());
    assert_eq!(system.cart_client.increase(session.cart_id, key).await.unwrap(), None);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_inactive_and_incomplete_products_rejected() {
    let (system, session) = start(FakeGateway::answering("1"), IdentityMemo::in_memory()).await;
    let soup = shop().find_product_by_name("soup").cloned().unwrap();

    let err = system.cart_client.add(session.cart_id, soup, vec![]).await.unwrap_err();
    assert_eq!(err, CartError::Unavailable("Soup".to_string()));

    let err = system.cart_client.add(session.cart_id, pizza(), vec![]).await.unwrap_err();
    assert!(matches!(err, CartError::InvalidSelection(_)));

    let cheese = Modifier::addon("Extra cheese", dec!(2.50));
    let err = system
        .cart_client
        .add(session.cart_id, pizza(), vec![Modifier::variation("Small"), cheese.clone(), cheese])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CartError::InvalidSelection(SelectionError::DuplicateModifier { .. })
    ));

    assert!(system.cart_client.snapshot(session.cart_id).await.unwrap().is_empty());
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_cart_never_reaches_the_gateway() {
    let gateway = FakeGateway::answering("T-1");
    let (system, session) = start(gateway.clone(), IdentityMemo::in_memory()).await;

    let err = system
        .checkout_client
        .initiate(session.checkout_id, OrderType::Takeaway)
        .await
        .unwrap_err();

    assert_eq!(err, CheckoutError::EmptyCart);
    assert_eq!(err.to_string(), "Your cart is empty. Please add some items first.");
    assert_eq!(gateway.calls(), 0);
    assert_eq!(
        system.checkout_client.state(session.checkout_id).await.unwrap(),
        CheckoutState::Idle
    );
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_known_customer_dine_in_skips_form_and_clears_cart() {
    let gateway = FakeGateway::answering("D-4821");
    let identity = IdentityMemo::in_memory();
    identity.set(&sara()).await.unwrap();
    let (system, session) = start(gateway.clone(), identity).await;

    system.cart_client.add(session.cart_id, burger(), vec![]).await.unwrap();
    let step = system
        .checkout_client
        .initiate(session.checkout_id, OrderType::DineIn)
        .await
        .unwrap();

    let CheckoutStep::Placed(confirmation) = step else {
        panic!("expected the order to be placed directly, got {step:?}");
    };
    assert_eq!(confirmation.order_number, "D-4821");
    assert!(confirmation.render().ends_with("Order number: D-4821"));

    let drafts = gateway.drafts();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].customer(), &sara());
    assert_eq!(
        drafts[0].fulfillment(),
        &Fulfillment::DineIn { desk: DeskNumber::new(12).unwrap() }
    );

    assert!(system.cart_client.snapshot(session.cart_id).await.unwrap().is_empty());
    assert_eq!(system.identity.get().await.unwrap(), Some(sara()));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_first_order_collects_then_remembers_identity() {
    let gateway = FakeGateway::answering("T-0042");
    let (system, session) = start(gateway.clone(), IdentityMemo::in_memory()).await;
    system.cart_client.add(session.cart_id, burger(), vec![]).await.unwrap();

    let step = system
        .checkout_client
        .initiate(session.checkout_id, OrderType::Takeaway)
        .await
        .unwrap();
    let CheckoutStep::CollectIdentity(form) = step else {
        panic!("expected identity collection, got {step:?}");
    };
    assert_eq!(form.fields, vec![FormField::Name, FormField::Phone]);
    assert_eq!(gateway.calls(), 0);

    let err = system
        .checkout_client
        .submit(session.checkout_id, CustomerDetails { name: Some("Sara".into()), ..Default::default() })
        .await
        .unwrap_err();
    assert_eq!(err, CheckoutError::MissingField("phone"));

    let confirmation = system
        .checkout_client
        .submit(session.checkout_id, CustomerDetails::contact("Sara", "0100000000"))
        .await
        .unwrap();
    assert_eq!(confirmation.order_number, "T-0042");
    assert!(confirmation.lines.iter().any(|l| l.contains("Sara")));
    assert_eq!(system.identity.get().await.unwrap(), Some(sara()));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_submission_keeps_cart() {
    let gateway = FakeGateway::new(Reply::Reject(503));
    let (system, session) = start(gateway.clone(), IdentityMemo::in_memory()).await;
    system.cart_client.add(session.cart_id, burger(), vec![]).await.unwrap();
    system
        .cart_client
        .add(session.cart_id, pizza(), vec![Modifier::variation("Large")])
        .await
        .unwrap();

    system
        .checkout_client
        .initiate(session.checkout_id, OrderType::Takeaway)
        .await
        .unwrap();
    let err = system
        .checkout_client
        .submit(session.checkout_id, CustomerDetails::contact("Sara", "0100000000"))
        .await
        .unwrap_err();

    assert_eq!(err, CheckoutError::SubmissionFailed(RETRY_MESSAGE.to_string()));
    assert_eq!(system.cart_client.snapshot(session.cart_id).await.unwrap().item_count(), 2);
    assert_eq!(system.identity.get().await.unwrap(), None);
    assert!(matches!(
        system.checkout_client.state(session.checkout_id).await.unwrap(),
        CheckoutState::Failed { order_type: OrderType::Takeaway, .. }
    ));

    // A retry goes through once the service is back.
    gateway.set_reply(Reply::Number(Some("T-0007".into())));
    system
        .checkout_client
        .initiate(session.checkout_id, OrderType::Takeaway)
        .await
        .unwrap();
    let confirmation = system
        .checkout_client
        .submit(session.checkout_id, CustomerDetails::contact("Sara", "0100000000"))
        .await
        .unwrap();
    assert_eq!(confirmation.order_number, "T-0007");
    assert_eq!(gateway.calls(), 2);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delivery_for_ali() {
    let gateway = FakeGateway::new(Reply::Number(None));
    let (system, session) = start(gateway.clone(), IdentityMemo::in_memory()).await;
    let line = system.cart_client.add(session.cart_id, burger(), vec![]).await.unwrap();
    system.cart_client.increase(session.cart_id, line.key).await.unwrap();

    let step = system
        .checkout_client
        .initiate(session.checkout_id, OrderType::Delivery)
        .await
        .unwrap();
    assert!(matches!(step, CheckoutStep::CollectIdentity(ref form) if form.fields.contains(&FormField::Address)));

    let details = CustomerDetails::contact("Ali", "0111111111")
        .with_address("5 Main St")
        .with_landmark("near mosque");
    let confirmation = system
        .checkout_client
        .submit(session.checkout_id, details)
        .await
        .unwrap();

    assert!(confirmation.order_number.starts_with("D-"));
    assert!(confirmation.render().contains("Ali"));
    assert!(system.cart_client.snapshot(session.cart_id).await.unwrap().is_empty());

    let draft = &gateway.drafts()[0];
    assert_eq!(draft.items()[0].quantity, 2);
    assert_eq!(draft.items()[0].unit_price, dec!(8.00));
    assert_eq!(
        draft.fulfillment(),
        &Fulfillment::Delivery {
            address: "5 Main St".into(),
            landmark: Some("near mosque".into()),
            notes: None,
        }
    );
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_known_customer_still_fills_delivery_form() {
    let identity = IdentityMemo::in_memory();
    identity.set(&sara()).await.unwrap();
    let (system, session) = start(FakeGateway::answering("D-1"), identity).await;
    system.cart_client.add(session.cart_id, burger(), vec![]).await.unwrap();

    let step = system
        .checkout_client
        .initiate(session.checkout_id, OrderType::Delivery)
        .await
        .unwrap();
    let CheckoutStep::CollectIdentity(form) = step else {
        panic!("delivery must ask for an address, got {step:?}");
    };
    assert_eq!(form.prefill, Some(sara()));

    // Blank name and phone are taken from the remembered customer.
    let confirmation = system
        .checkout_client
        .submit(
            session.checkout_id,
            CustomerDetails::default().with_address("1 Corniche"),
        )
        .await
        .unwrap();
    assert!(confirmation.render().contains("Sara"));
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_submission_timeout_counts_as_failure() {
    let gateway = FakeGateway::new(Reply::Hang);
    let mut config = config();
    config.submit_timeout = Duration::from_secs(2);
    let system = MenuSystem::new(gateway.clone(), IdentityMemo::in_memory(), &config);
    let session = system.open_session(&shop(), None).await.unwrap();
    system.cart_client.add(session.cart_id, burger(), vec![]).await.unwrap();

    system
        .checkout_client
        .initiate(session.checkout_id, OrderType::Takeaway)
        .await
        .unwrap();
    let err = system
        .checkout_client
        .submit(session.checkout_id, CustomerDetails::contact("Sara", "0100000000"))
        .await
        .unwrap_err();

    assert_eq!(err, CheckoutError::SubmissionFailed(RETRY_MESSAGE.to_string()));
    assert!(!system.cart_client.snapshot(session.cart_id).await.unwrap().is_empty());
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_order_type_guards() {
    let mut takeaway_only = shop();
    takeaway_only.business_info = BusinessInfo {
        has_takeaway: true,
        ..BusinessInfo::default()
    };
    let system = MenuSystem::new(FakeGateway::answering("1"), IdentityMemo::in_memory(), &config());

    let no_desk = system.open_session(&shop(), None).await.unwrap();
    system.cart_client.add(no_desk.cart_id, burger(), vec![]).await.unwrap();
    let err = system
        .checkout_client
        .initiate(no_desk.checkout_id, OrderType::DineIn)
        .await
        .unwrap_err();
    assert_eq!(err, CheckoutError::MissingDesk);

    let limited = system.open_session(&takeaway_only, DeskNumber::new(3)).await.unwrap();
    system.cart_client.add(limited.cart_id, burger(), vec![]).await.unwrap();
    let err = system
        .checkout_client
        .initiate(limited.checkout_id, OrderType::Delivery)
        .await
        .unwrap_err();
    assert_eq!(err, CheckoutError::OrderTypeUnavailable(OrderType::Delivery));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancel_and_close_session() {
    let (system, session) = start(FakeGateway::answering("1"), IdentityMemo::in_memory()).await;
    system.cart_client.add(session.cart_id, burger(), vec![]).await.unwrap();
    system
        .checkout_client
        .initiate(session.checkout_id, OrderType::Takeaway)
        .await
        .unwrap();

    system.checkout_client.cancel(session.checkout_id).await.unwrap();
    assert_eq!(
        system.checkout_client.state(session.checkout_id).await.unwrap(),
        CheckoutState::Idle
    );
    let err = system
        .checkout_client
        .submit(session.checkout_id, CustomerDetails::contact("Sara", "0100000000"))
        .await
        .unwrap_err();
    assert_eq!(err, CheckoutError::NotCollecting);

    system.close_session(session).await.unwrap();
    assert!(system.cart_client.get(session.cart_id).await.unwrap().is_none());
    assert!(matches!(
        system.checkout_client.state(session.checkout_id).await,
        Err(CheckoutError::NotFound(_))
    ));
    system.shutdown().await.unwrap();
}

/// Two initiations racing on one checkout place a single order.
#[tokio::test]
async fn test_concurrent_initiate_submits_once() {
    let gateway = FakeGateway::answering("4821");
    let identity = IdentityMemo::in_memory();
    identity.set(&sara()).await.unwrap();
    let (system, session) = start(gateway.clone(), identity).await;
    system.cart_client.add(session.cart_id, burger(), vec![]).await.unwrap();

    let (a, b) = tokio::join!(
        system.checkout_client.initiate(session.checkout_id, OrderType::DineIn),
        system.checkout_client.initiate(session.checkout_id, OrderType::Takeaway),
    );

    assert!(matches!(a, Ok(CheckoutStep::Placed(_))));
    assert_eq!(b.unwrap_err(), CheckoutError::EmptyCart);
    assert_eq!(gateway.calls(), 1);
    assert!(system.cart_client.snapshot(session.cart_id).await.unwrap().is_empty());
    system.shutdown().await.unwrap();
}
