//! Example encodings built on top of the core engine, used as end-to-end
//! exercises rather than part of the public contract.

mod nqueens;

pub use nqueens::queens_count;
