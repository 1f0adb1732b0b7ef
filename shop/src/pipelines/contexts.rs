// shop/src/pipelines/contexts.rs

//! Data carried through each pipeline run. Handlers receive these wrapped
//! in `plugpoint_flow::ContextData`.

use crate::models::{Cart, CartLine, Order, Product, Session, User};
use crate::notice::Notice;
use crate::state::AppState;

#[derive(Clone)]
pub struct RegisterCtxData {
  pub app_state: AppState,
  pub username: String,
  pub password1: String,
  pub password2: String,
  pub created_user: Option<User>,
  pub session: Option<Session>,
}

impl RegisterCtxData {
  pub fn new(app_state: AppState, username: String, password1: String, password2: String) -> Self {
    Self {
      app_state,
      username,
      password1,
      password2,
      created_user: None,
      session: None,
    }
  }
}

#[derive(Clone)]
pub struct LoginCtxData {
  pub app_state: AppState,
  pub username: String,
  pub password: String,
  pub user: Option<User>,
  pub session: Option<Session>,
}

impl LoginCtxData {
  pub fn new(app_state: AppState, username: String, password: String) -> Self {
    Self {
      app_state,
      username,
      password,
      user: None,
      session: None,
    }
  }
}

#[derive(Clone)]
pub struct AddToCartCtxData {
  pub app_state: AppState,
  pub user_id: i64,
  pub product_id: i64,
  /// Requested quantity; `None` means one unit.
  pub requested_quantity: Option<i64>,
  pub quantity: i64,
  pub product: Option<Product>,
  pub notice: Option<Notice>,
}

impl AddToCartCtxData {
  pub fn new(app_state: AppState, user_id: i64, product_id: i64, requested_quantity: Option<i64>) -> Self {
    Self {
      app_state,
      user_id,
      product_id,
      requested_quantity,
      quantity: 1,
      product: None,
      notice: None,
    }
  }
}

#[derive(Clone)]
pub struct UpdateCartItemCtxData {
  pub app_state: AppState,
  pub user_id: i64,
  pub item_id: i64,
  pub quantity: i64,
  pub line: Option<CartLine>,
  pub notice: Option<Notice>,
}

impl UpdateCartItemCtxData {
  pub fn new(app_state: AppState, user_id: i64, item_id: i64, quantity: Option<i64>) -> Self {
    Self {
      app_state,
      user_id,
      item_id,
      quantity: quantity.unwrap_or(1),
      line: None,
      notice: None,
    }
  }
}

#[derive(Clone)]
pub struct CheckoutCtxData {
  pub app_state: AppState,
  pub user_id: i64,
  pub shipping_address: String,
  pub cart: Option<Cart>,
  pub lines: Vec<CartLine>,
  pub order: Option<Order>,
  pub notice: Option<Notice>,
}

impl CheckoutCtxData {
  pub fn new(app_state: AppState, user_id: i64, shipping_address: String) -> Self {
    Self {
      app_state,
      user_id,
      shipping_address,
      cart: None,
      lines: Vec::new(),
      order: None,
      notice: None,
    }
  }
}
