//! Database module: schema bootstrap and parameterized data access.
//!
//! Layout:
//! - `executor.rs`: positional-parameter statement runner, the only path to the pool
//! - `schema.rs`: SQL DDL and seed statements (SQLite)
//! - `bootstrap.rs`: drop-and-recreate seeding run once at startup
//! - `seed.rs`: seed document loading
//! - `models.rs`: Rust structs mirroring DB rows and their public projections
//! - `accounts.rs` / `courses.rs`: repositories used by the handlers

pub mod accounts;
pub mod bootstrap;
pub mod courses;
pub mod executor;
pub mod models;
pub mod schema;
pub mod seed;

pub use accounts::AccountRepository;
pub use bootstrap::{BootstrapError, SchemaBootstrapper};
pub use courses::CourseRepository;
pub use executor::{Param, QueryExecutor, SqlitePool};
pub use seed::SeedData;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use crate::error::StoreError;

/// Open the pool, creating the database file if needed. Foreign keys are enforced.
pub async fn connect(database_url: &str) -> Result<SqlitePool, StoreError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    Ok(pool)
}
