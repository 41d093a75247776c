//! A reduced ordered binary decision diagram (ROBDD) engine with complement
//! edges.
//!
//! The core building blocks:
//! - [`repr`] — complement-edge node references and the unique-table entry
//!   they point at.
//! - [`backing_store`] — the concurrent unique table nodes are interned
//!   into.
//! - [`manager`] — the `ITE` rewriter and the [`Manager`] that owns both the
//!   unique table and the memoized computed cache.
//! - [`traversal`] — witness extraction and model counting over a built
//!   diagram.
//! - [`Bdd`] — the handle type most callers build diagrams through.

pub mod backing_store;
pub mod bdd;
pub mod demos;
pub mod dot;
pub mod error;
pub mod manager;
pub mod repr;
pub mod traversal;

pub use bdd::Bdd;
pub use error::BddError;
pub use manager::Manager;
pub use repr::{NodeRef, VarId};
