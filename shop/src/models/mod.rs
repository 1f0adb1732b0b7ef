// shop/src/models/mod.rs

//! Rows and read models persisted in SQLite.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, CartItem, CartLine, CartView};
pub use order::{Order, OrderItem, OrderStatus, OrderView};
pub use product::{NewProduct, Product};
pub use session::Session;
pub use user::User;
