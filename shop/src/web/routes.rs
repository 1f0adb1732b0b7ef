// shop/src/web/routes.rs

use actix_web::{web, HttpResponse};

use crate::web::handlers::{auth_handlers, cart_handlers, catalog_handlers, checkout_handlers, order_handlers};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .route("", web::get().to(catalog_handlers::home_handler))
      .route("/", web::get().to(catalog_handlers::home_handler))
      .service(
        web::scope("/auth")
          .route("/register", web::post().to(auth_handlers::register_handler))
          .route("/login", web::post().to(auth_handlers::login_handler))
          .route("/logout", web::post().to(auth_handlers::logout_handler)),
      )
      .service(
        web::scope("/products")
          .route("", web::get().to(catalog_handlers::list_products_handler))
          .route("/{product_id}", web::get().to(catalog_handlers::product_detail_handler)),
      )
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::view_cart_handler))
          .route("/add/{product_id}", web::post().to(cart_handlers::add_to_cart_handler))
          .route("/items/{item_id}", web::post().to(cart_handlers::update_cart_item_handler))
          .route("/items/{item_id}", web::delete().to(cart_handlers::remove_cart_item_handler)),
      )
      .service(
        web::scope("/checkout")
          .route("", web::get().to(checkout_handlers::checkout_summary_handler))
          .route("", web::post().to(checkout_handlers::place_order_handler)),
      )
      .service(
        web::scope("/orders")
          .route("", web::get().to(order_handlers::list_orders_handler))
          .route("/{order_id}", web::get().to(order_handlers::order_detail_handler)),
      ),
  );
}
