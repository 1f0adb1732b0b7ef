// shop/tests/common/mod.rs
#![allow(dead_code)]

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{web, App};
use plugpoint::config::AppConfig;
use plugpoint::models::{NewProduct, Product};
use plugpoint::state::AppState;
use plugpoint::web::configure_app_routes;
use plugpoint::{db, store};
use serde_json::{json, Value};

pub const PASSWORD: &str = "wattage-2024";

/// Fresh in-memory database with the schema applied and pipelines registered.
pub async fn test_state() -> AppState {
  let pool = db::connect_in_memory().await.expect("in-memory database");
  db::migrate(&pool).await.expect("migrations apply");
  let config = AppConfig::from_lookup(|_| None).expect("default config");
  AppState::bootstrap(pool, config)
}

pub async fn add_product(state: &AppState, name: &str, price_cents: i64, stock: i64) -> Product {
  let new_product = NewProduct {
    name: name.to_string(),
    description: format!("{name} for testing"),
    price_cents,
    stock,
    image_url: None,
  };
  store::products::insert(&state.db_pool, &new_product).await.expect("product insert")
}

pub async fn stock_of(state: &AppState, product_id: i64) -> i64 {
  store::products::get(&state.db_pool, product_id)
    .await
    .expect("product query")
    .expect("product exists")
    .stock
}

/// Runs one request through a freshly built app and decodes the JSON body.
pub async fn send(state: &AppState, req: TestRequest) -> (StatusCode, Value) {
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(state.clone()))
      .configure(configure_app_routes),
  )
  .await;
  let resp = test::call_service(&app, req.to_request()).await;
  let status = resp.status();
  let body = test::read_body(resp).await;
  let value = if body.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&body).expect("JSON body")
  };
  (status, value)
}

pub fn authed(req: TestRequest, token: &str) -> TestRequest {
  req.insert_header(("Authorization", format!("Bearer {token}")))
}

/// Registers `username` and returns its session token.
pub async fn register(state: &AppState, username: &str) -> String {
  let (status, body) = send(
    state,
    TestRequest::post().uri("/api/v1/auth/register").set_json(json!({
      "username": username,
      "password1": PASSWORD,
      "password2": PASSWORD,
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
  body["token"].as_str().expect("token in body").to_string()
}

pub async fn add_to_cart(state: &AppState, token: &str, product_id: i64, quantity: Option<i64>) -> (StatusCode, Value) {
  let uri = format!("/api/v1/cart/add/{product_id}");
  let req = match quantity {
    Some(q) => TestRequest::post().uri(&uri).set_json(json!({ "quantity": q })),
    None => TestRequest::post().uri(&uri),
  };
  send(state, authed(req, token)).await
}

pub async fn checkout(state: &AppState, token: &str, address: &str) -> (StatusCode, Value) {
  let req = TestRequest::post()
    .uri("/api/v1/checkout")
    .set_json(json!({ "shipping_address": address }));
  send(state, authed(req, token)).await
}
