//! `PostgreSQL` adapters for task persistence.

mod models;
mod pool;
mod repository;
mod schema;

pub use pool::{CREATE_TASKS_SQL, PoolSettings, TaskPgPool, apply_schema, build_pool};
pub use repository::PostgresTaskRepository;
