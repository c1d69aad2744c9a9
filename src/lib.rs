//! Task API: a single-entity task tracker exposed over HTTP.
//!
//! The crate provides task creation, lookup, listing, partial update and
//! deletion, backed by either `PostgreSQL` or an in-memory store.
//!
//! # Architecture
//!
//! The task module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task record store and lifecycle service
//! - [`http`]: JSON transport mapped onto the lifecycle service
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Tracing subscriber installation
//! - [`server`]: Process bootstrap and graceful shutdown

pub mod config;
pub mod http;
pub mod server;
pub mod task;
pub mod telemetry;
