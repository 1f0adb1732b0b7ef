// shop/src/web/handlers/catalog_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::errors::{AppError, Result};
use crate::state::AppState;
use crate::store;

#[derive(Deserialize, Debug)]
pub struct ProductQuery {
  pub search: Option<String>,
}

/// Home page: a random selection of in-stock products.
#[instrument(name = "handler::home", skip_all)]
pub async fn home_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let limit = app_state.config.featured_product_count;
  let featured = store::products::featured(&app_state.db_pool, limit).await?;
  Ok(HttpResponse::Ok().json(json!({ "featured_products": featured })))
}

#[instrument(name = "handler::list_products", skip(app_state, query), fields(search = ?query.search))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ProductQuery>,
) -> Result<HttpResponse> {
  let search = query.into_inner().search.unwrap_or_default();
  let products = store::products::list(&app_state.db_pool, Some(&search)).await?;
  debug!(count = products.len(), "Products listed.");
  Ok(HttpResponse::Ok().json(json!({ "products": products, "search": search })))
}

#[instrument(name = "handler::product_detail", skip(app_state, path), fields(product_id = *path))]
pub async fn product_detail_handler(app_state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse> {
  let product_id = path.into_inner();
  let product = store::products::get(&app_state.db_pool, product_id)
    .await?
    .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
  Ok(HttpResponse::Ok().json(product))
}
