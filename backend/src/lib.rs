//! Users service library modules.
//!
//! Hexagonal layout: [`domain`] owns the entity, ports and service,
//! [`inbound`] adapts HTTP onto the driving ports and [`outbound`] provides
//! the SQLite and in-memory repositories.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;
