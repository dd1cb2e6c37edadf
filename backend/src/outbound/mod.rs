//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of the `UserRepository` port:
//!
//! - **persistence**: SQLite-backed repository using SQLx
//! - **memory**: process-local repository for tests and throwaway runs
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
