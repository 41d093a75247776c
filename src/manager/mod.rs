//! The `ITE` engine and the manager that owns its backing storage.

mod cache;
mod ite;
#[allow(clippy::module_inception)]
mod manager;

pub use manager::{Manager, DEFAULT_GRANULARITY};
