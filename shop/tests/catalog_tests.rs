// shop/tests/catalog_tests.rs
mod common;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use common::*;

#[actix_web::test]
async fn health_check_is_ok() {
  let state = test_state().await;
  let (status, body) = send(&state, TestRequest::get().uri("/api/v1/health")).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn products_are_listed_by_name_and_searchable() {
  let state = test_state().await;
  add_product(&state, "Smart Plug", 1499, 5).await;
  add_product(&state, "Extension Reel", 3499, 2).await;
  add_product(&state, "smart bulb", 999, 0).await;

  let (status, body) = send(&state, TestRequest::get().uri("/api/v1/products")).await;
  assert_eq!(status, StatusCode::OK);
  let names: Vec<&str> = body["products"]
    .as_array()
    .expect("products array")
    .iter()
    .map(|p| p["name"].as_str().expect("name"))
    .collect();
  assert_eq!(names.len(), 3);
  assert_eq!(names[0], "Extension Reel");
  assert_eq!(body["search"], "");

  let (_, body) = send(&state, TestRequest::get().uri("/api/v1/products?search=SMART")).await;
  assert_eq!(body["products"].as_array().expect("products array").len(), 2);
  assert_eq!(body["search"], "SMART");

  let (_, body) = send(&state, TestRequest::get().uri("/api/v1/products?search=toaster")).await;
  assert!(body["products"].as_array().expect("products array").is_empty());
}

#[actix_web::test]
async fn product_detail_or_404() {
  let state = test_state().await;
  let plug = add_product(&state, "Smart Plug", 1499, 5).await;

  let (status, body) = send(&state, TestRequest::get().uri(&format!("/api/v1/products/{}", plug.id))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["name"], "Smart Plug");
  assert_eq!(body["price_cents"], 1499);

  let (status, body) = send(&state, TestRequest::get().uri("/api/v1/products/9999")).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "Product not found");
}

#[actix_web::test]
async fn home_features_only_in_stock_products() {
  let state = test_state().await;
  for i in 0..6 {
    add_product(&state, &format!("Charger {i}"), 1000 + i, 3).await;
  }
  add_product(&state, "Sold Out Pad", 1999, 0).await;

  let (status, body) = send(&state, TestRequest::get().uri("/api/v1/")).await;
  assert_eq!(status, StatusCode::OK);
  let featured = body["featured_products"].as_array().expect("featured array");
  assert_eq!(featured.len(), 4);
  assert!(featured.iter().all(|p| p["stock"].as_i64().unwrap_or(0) > 0));
}
