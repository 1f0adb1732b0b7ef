// shop/src/store/mod.rs

//! SQL for each aggregate. Functions that issue a single statement accept any
//! `SqliteExecutor`, so they work against the pool or inside a transaction.

pub mod carts;
pub mod orders;
pub mod products;
pub mod sessions;
pub mod users;
