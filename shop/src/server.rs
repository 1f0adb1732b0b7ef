// shop/src/server.rs

use crate::state::AppState;
use crate::web::configure_app_routes;
use actix_web::{web, App, HttpServer};
use tracing::info;

/// Serves the API on `bind_address` until the process is stopped.
pub async fn run_server(app_state: AppState, bind_address: &str) -> std::io::Result<()> {
  info!("Attempting to bind server to {}...", bind_address);

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(bind_address)?
  .run()
  .await
}
