//! SQLite persistence adapters using SQLx.
//!
//! This module provides the concrete implementation of the user repository
//! port backed by SQLite via `sqlx`, with async connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   row structs and domain types. No business logic resides here.
//! - **Internal models**: Row structs (`models.rs`) are internal
//!   implementation details, never exposed to the domain layer.
//! - **Parameterised SQL**: every statement binds its values; nothing is
//!   concatenated into query text.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types.
//!
//! # Example
//!
//! ```no_run
//! use users_service::outbound::persistence::{
//!     DbPool, PoolConfig, SqlxUserRepository, ensure_users_table,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("sqlite:mydb.sqlite")).await?;
//! ensure_users_table(&pool).await?;
//! let repo = SqlxUserRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod models;
mod pool;
mod schema;
mod sqlx_error_mapping;
mod sqlx_user_repository;

pub use pool::{DbPool, PoolConfig, PoolError};
pub use schema::{CREATE_USERS_TABLE, SchemaError, ensure_users_table};
pub use sqlx_user_repository::SqlxUserRepository;
