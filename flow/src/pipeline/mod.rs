// flow/src/pipeline/mod.rs

//! `Pipeline<TData, Err>`: construction, handler hooks and execution.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Pipeline;
