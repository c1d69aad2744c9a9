//! Connection pool construction and schema bootstrap.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::time::Duration;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL creating the `tasks` table and its indexes.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-01-13-000000_create_tasks/up.sql");

/// Pool sizing and checkout behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum number of pooled connections.
    pub max_size: u32,
    /// Maximum time to wait when checking out a connection.
    pub connection_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_size: 5,
            connection_timeout: Duration::from_secs(30),
        }
    }
}

/// Builds a connection pool that validates each connection on checkout.
///
/// This blocks until the pool has established its initial connections, so
/// call it from a blocking context.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be established
/// within the configured timeout.
pub fn build_pool(database_url: &str, settings: &PoolSettings) -> Result<TaskPgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(settings.max_size)
        .connection_timeout(settings.connection_timeout)
        .test_on_check_out(true)
        .build(manager)
}

/// Applies the task schema on the given connection.
///
/// # Errors
///
/// Returns the Diesel error raised by the DDL batch.
pub fn apply_schema(connection: &mut PgConnection) -> diesel::QueryResult<()> {
    connection.batch_execute(CREATE_TASKS_SQL)
}
