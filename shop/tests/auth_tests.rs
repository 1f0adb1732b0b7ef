// shop/tests/auth_tests.rs
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{web, App};
use common::*;
use chrono::{Duration, Utc};
use plugpoint::models::Session;
use plugpoint::services::session_service::{self, SESSION_COOKIE};
use plugpoint::store;
use plugpoint::web::configure_app_routes;
use serde_json::json;

fn register_request(username: &str, password1: &str, password2: &str) -> TestRequest {
  TestRequest::post().uri("/api/v1/auth/register").set_json(json!({
    "username": username,
    "password1": password1,
    "password2": password2,
  }))
}

#[actix_web::test]
async fn register_opens_a_session_and_sets_the_cookie() {
  let state = test_state().await;
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let resp = test::call_service(&app, register_request("ada", PASSWORD, PASSWORD).to_request()).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let cookie = resp
    .response()
    .cookies()
    .find(|c| c.name() == SESSION_COOKIE)
    .expect("session cookie set");
  let cookie_token = cookie.value().to_string();

  let body: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], "Registration successful!");
  assert_eq!(body["level"], "success");
  assert_eq!(body["user"]["username"], "ada");
  assert!(body["user"].get("password_hash").is_none());
  assert_eq!(body["token"], cookie_token);

  // The cookie alone authenticates.
  let req = TestRequest::get()
    .uri("/api/v1/cart")
    .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE, cookie_token));
  let resp = test::call_service(&app, req.to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn register_rejects_bad_input() {
  let state = test_state().await;

  let (status, body) = send(&state, register_request("ada", PASSWORD, "different-9")).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "The two password fields didn't match.");
  assert_eq!(body["level"], "error");

  let (status, _) = send(&state, register_request("ada", "short", "short")).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = send(&state, register_request("bad name", PASSWORD, PASSWORD)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn duplicate_username_is_rejected() {
  let state = test_state().await;
  register(&state, "grace").await;

  let (status, body) = send(&state, register_request("grace", PASSWORD, PASSWORD)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "A user with that username already exists.");
}

#[actix_web::test]
async fn login_and_logout_round_trip() {
  let state = test_state().await;
  register(&state, "linus").await;

  let (status, body) = send(
    &state,
    TestRequest::post()
      .uri("/api/v1/auth/login")
      .set_json(json!({ "username": "linus", "password": PASSWORD })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "Login successful!");
  let token = body["token"].as_str().expect("token").to_string();

  let (status, _) = send(&state, authed(TestRequest::get().uri("/api/v1/orders"), &token)).await;
  assert_eq!(status, StatusCode::OK);

  let (status, body) = send(&state, authed(TestRequest::post().uri("/api/v1/auth/logout"), &token)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "Logged out successfully");

  let (status, _) = send(&state, authed(TestRequest::get().uri("/api/v1/orders"), &token)).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn login_failures_share_one_message() {
  let state = test_state().await;
  register(&state, "margaret").await;

  let (status, wrong_password) = send(
    &state,
    TestRequest::post()
      .uri("/api/v1/auth/login")
      .set_json(json!({ "username": "margaret", "password": "not-the-password" })),
  )
  .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);

  let (status, unknown_user) = send(
    &state,
    TestRequest::post()
      .uri("/api/v1/auth/login")
      .set_json(json!({ "username": "nobody", "password": PASSWORD })),
  )
  .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(wrong_password["error"], unknown_user["error"]);
  assert_eq!(unknown_user["error"], "Invalid username or password");
}

#[actix_web::test]
async fn protected_routes_need_a_session() {
  let state = test_state().await;

  let (status, _) = send(&state, TestRequest::get().uri("/api/v1/cart")).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);

  let (status, _) = send(&state, authed(TestRequest::get().uri("/api/v1/cart"), "forged-token")).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);

  // Logging out without a session still succeeds.
  let (status, _) = send(&state, TestRequest::post().uri("/api/v1/auth/logout")).await;
  assert_eq!(status, StatusCode::OK);
}

fn session_at(user_id: i64, token: &str, expires_in: Duration) -> Session {
  let now = Utc::now();
  Session {
    token: token.to_string(),
    user_id,
    created_at: now - Duration::days(30),
    expires_at: now + expires_in,
  }
}

async fn user_id_of(state: &plugpoint::AppState, username: &str) -> i64 {
  store::users::find_by_username(&state.db_pool, username)
    .await
    .expect("user query")
    .expect("user exists")
    .id
}

#[actix_web::test]
async fn expired_session_is_rejected() {
  let state = test_state().await;
  register(&state, "ada").await;
  let user_id = user_id_of(&state, "ada").await;

  let stale = session_at(user_id, "stale-token", -Duration::hours(1));
  store::sessions::insert(&state.db_pool, &stale).await.expect("session insert");

  let (status, body) = send(&state, authed(TestRequest::get().uri("/api/v1/cart"), "stale-token")).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(body["level"], "error");
}

#[actix_web::test]
async fn purge_removes_only_expired_sessions() {
  let state = test_state().await;
  let live_token = register(&state, "ada").await;
  let user_id = user_id_of(&state, "ada").await;

  for (token, expires_in) in [
    ("expired-minutes-ago", -Duration::minutes(5)),
    ("expired-last-week", -Duration::days(7)),
    ("valid-for-an-hour", Duration::hours(1)),
  ] {
    store::sessions::insert(&state.db_pool, &session_at(user_id, token, expires_in))
      .await
      .expect("session insert");
  }

  let purged = store::sessions::purge_expired(&state.db_pool, Utc::now()).await.expect("purge");
  assert_eq!(purged, 2);

  for token in [live_token.as_str(), "valid-for-an-hour"] {
    let user = session_service::resolve(&state.db_pool, token).await.expect("resolve");
    assert_eq!(user.map(|u| u.id), Some(user_id));
  }
  assert!(session_service::resolve(&state.db_pool, "expired-last-week")
    .await
    .expect("resolve")
    .is_none());
}
