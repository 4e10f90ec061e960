//! Database layer - connection pool, migrations and repositories
//!
//! # Design Principles
//!
//! - One pool per process, built at startup and shared through app state
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Partial updates happen in SQL (COALESCE), not read-modify-write

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
