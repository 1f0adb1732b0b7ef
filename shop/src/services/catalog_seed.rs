// shop/src/services/catalog_seed.rs

//! Demo catalog for fresh installations.

use crate::errors::Result;
use crate::models::NewProduct;
use crate::store;
use sqlx::SqlitePool;
use tracing::{info, instrument};

fn demo_catalog() -> Vec<NewProduct> {
  let item = |name: &str, description: &str, price_cents: i64, stock: i64, image: &str| NewProduct {
    name: name.to_string(),
    description: description.to_string(),
    price_cents,
    stock,
    image_url: Some(format!("/media/products/{image}")),
  };
  vec![
    item("USB-C Wall Charger 65W", "GaN charger with two USB-C and one USB-A port.", 3999, 25, "charger-65w.jpg"),
    item("Smart Plug Mini", "Wi-Fi plug with energy monitoring and schedules.", 1499, 60, "smart-plug-mini.jpg"),
    item("Braided USB-C Cable 2m", "100W rated, nylon braided.", 1299, 120, "usb-c-cable.jpg"),
    item("Surge Protector Strip", "Six outlets, two USB ports, 2100 joules.", 2999, 18, "surge-strip.jpg"),
    item("Travel Adapter Kit", "Universal adapter for 150+ countries.", 2499, 12, "travel-adapter.jpg"),
    item("Wireless Charging Pad", "Qi-certified 15W pad.", 1999, 0, "wireless-pad.jpg"),
    item("Extension Reel 10m", "Four sockets with thermal cut-out.", 3499, 7, "extension-reel.jpg"),
    item("Power Bank 20000mAh", "Dual output with pass-through charging.", 4599, 30, "power-bank.jpg"),
  ]
}

/// Inserts the demo catalog when the product table is empty. Returns how many products were added.
#[instrument(name = "catalog_seed::seed_if_empty", skip_all)]
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<usize> {
  if store::products::count(pool).await? > 0 {
    info!("Catalog already populated, skipping seed.");
    return Ok(0);
  }

  let mut tx = pool.begin().await?;
  let catalog = demo_catalog();
  for product in &catalog {
    store::products::insert(&mut *tx, product).await?;
  }
  tx.commit().await?;

  info!(count = catalog.len(), "Seeded demo catalog.");
  Ok(catalog.len())
}
