//! `emenu` command line: place one order against a restaurant's menu API.
//!
//! ```bash
//! emenu --shop 3 --desk 12 --order-type dine-in --product 7 --product "Pizza:Large,Cheese"
//! emenu --shop 3 --order-type delivery --name Ali --phone 0100000000 \
//!       --address "12 Nile St" --product 7
//! emenu --history
//! emenu --logout
//! ```

use clap::Parser;
use emenu::checkout_actor::CheckoutStep;
use emenu::config::Config;
use emenu::gateway::{CatalogSource, HttpCatalog, HttpOrderGateway, OrderGateway};
use emenu::identity::{FileSessionStore, IdentityMemo};
use emenu::lifecycle::{setup_tracing, MenuSystem};
use emenu::model::{
    CustomerDetails, DeskNumber, Modifier, OrderType, Product, ProductId, Shop, ShopId,
};
use emenu::modifiers::ModifierSelection;
use std::sync::Arc;
use tracing::{info, Instrument};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Shop to order from.
    #[arg(long, required_unless_present_any = ["logout", "history"])]
    shop: Option<u64>,

    /// Desk (table) number from the QR code. Needed for dine-in.
    #[arg(long)]
    desk: Option<u32>,

    /// dine-in, takeaway or delivery.
    #[arg(long, default_value = "dine-in")]
    order_type: OrderType,

    /// Product id or name, optionally followed by `:` and comma-separated modifier names.
    #[arg(long = "product")]
    products: Vec<String>,

    #[arg(long, env = "EMENU_CUSTOMER_NAME")]
    name: Option<String>,

    #[arg(long, env = "EMENU_CUSTOMER_PHONE")]
    phone: Option<String>,

    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    landmark: Option<String>,

    #[arg(long)]
    notes: Option<String>,

    /// List the remembered customer's past orders and exit.
    #[arg(long)]
    history: bool,

    /// Forget the remembered customer and exit.
    #[arg(long)]
    logout: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let args = Args::parse();
    let config = Config::load().map_err(|e| e.to_string())?;

    let identity = IdentityMemo::new(Arc::new(FileSessionStore::new(config.session_file.clone())));
    if args.logout {
        identity.clear().await.map_err(|e| e.to_string())?;
        println!("Signed out.");
        return Ok(());
    }

    let gateway = Arc::new(
        HttpOrderGateway::new(&config.api_url, config.submit_timeout).map_err(|e| e.to_string())?,
    );
    if args.history {
        return print_history(gateway.as_ref(), &identity).await;
    }

    let shop_id = ShopId(args.shop.ok_or("--shop is required")?);
    let catalog = HttpCatalog::new(&config.api_url, config.submit_timeout).map_err(|e| e.to_string())?;
    let mut shop = catalog.fetch_shop(shop_id).await.map_err(|e| e.to_string())?;
    if shop.categories.is_empty() {
        shop.categories = catalog
            .fetch_categories(shop_id)
            .await
            .map_err(|e| e.to_string())?;
    }
    info!(
        shop = %shop.id,
        name = %shop.name,
        categories = shop.categories.len(),
        "Menu loaded"
    );

    let system = MenuSystem::new(gateway, identity, &config);
    let outcome = place_order(&system, &shop, &args)
        .instrument(tracing::info_span!("order", shop = %shop.id))
        .await;
    system.shutdown().await?;

    println!("{}", outcome?);
    Ok(())
}

async fn place_order(system: &MenuSystem, shop: &Shop, args: &Args) -> Result<String, String> {
    let desk = args.desk.and_then(DeskNumber::new);
    let session = system.open_session(shop, desk).await.map_err(|e| e.to_string())?;

    for spec in &args.products {
        let (product, modifiers) = pick(shop, spec)?;
        let line = system
            .cart_client
            .add(session.cart_id, product, modifiers)
            .await
            .map_err(|e| e.to_string())?;
        info!(line = %line.key, quantity = line.quantity, "Added to cart");
    }
    let total = system.cart_client.total(session.cart_id).await.map_err(|e| e.to_string())?;
    info!(%total, "Cart ready");

    let step = system
        .checkout_client
        .initiate(session.checkout_id, args.order_type)
        .await
        .map_err(|e| e.to_string())?;

    let confirmation = match step {
        CheckoutStep::Placed(confirmation) => confirmation,
        CheckoutStep::CollectIdentity(form) => {
            let fields: Vec<_> = form.fields.iter().map(|f| f.label()).collect();
            info!(?fields, "Customer details needed");
            system
                .checkout_client
                .submit(session.checkout_id, details_from(args))
                .await
                .map_err(|e| e.to_string())?
        }
    };
    Ok(confirmation.render())
}

/// Resolves `name-or-id[:modifier,modifier]` against the shop's products.
fn pick(shop: &Shop, spec: &str) -> Result<(Product, Vec<Modifier>), String> {
    let (wanted, modifiers) = match spec.split_once(':') {
        Some((wanted, modifiers)) => (wanted.trim(), Some(modifiers)),
        None => (spec.trim(), None),
    };
    let product = match wanted.parse::<u64>() {
        Ok(id) => shop.product(ProductId(id)),
        Err(_) => shop.find_product_by_name(wanted),
    }
    .ok_or_else(|| format!("{} has no product `{wanted}`", shop.name))?;

    let Some(mut selection) = ModifierSelection::resolve(product, None) else {
        return Ok((product.clone(), Vec::new()));
    };
    for name in modifiers.into_iter().flat_map(|m| m.split(',')).map(str::trim) {
        if !name.is_empty() && !selection.choose(name) {
            return Err(format!("{} has no option `{name}`", product.name));
        }
    }
    let chosen = selection
        .finalize()
        .ok_or_else(|| format!("choose an option for {}", product.name))?;
    Ok((product.clone(), chosen))
}

fn details_from(args: &Args) -> CustomerDetails {
    CustomerDetails {
        name: args.name.clone(),
        phone: args.phone.clone(),
        address: args.address.clone(),
        landmark: args.landmark.clone(),
        notes: args.notes.clone(),
    }
}

async fn print_history(gateway: &dyn OrderGateway, identity: &IdentityMemo) -> Result<(), String> {
    let customer = identity.get().await.map_err(|e| e.to_string())?;
    let orders = gateway
        .list_orders(customer.as_ref())
        .await
        .map_err(|e| e.to_string())?;
    if orders.is_empty() {
        println!("No orders yet.");
    }
    for order in &orders {
        println!(
            "{}  {:<16} {:<10} {}",
            order.display_number(),
            order.status.label(),
            order.order_type.to_string(),
            order.total,
        );
        for item in &order.items {
            println!("    {} x {}  {}", item.quantity, item.name(), item.subtotal());
        }
    }
    Ok(())
}
