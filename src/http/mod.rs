//! JSON-over-HTTP transport for the task lifecycle service.
//!
//! | Method | Path | Service call |
//! |---|---|---|
//! | `POST` | `/tasks` | create |
//! | `GET` | `/tasks` | list |
//! | `GET` | `/tasks/{task_id}` | get |
//! | `PUT` | `/tasks/{task_id}` | update |
//! | `DELETE` | `/tasks/{task_id}` | delete |
//! | `GET` | `/health` | liveness probe |

mod dto;
mod error;
mod handlers;
mod state;

pub use dto::{CreateTaskBody, HealthResponse, TaskResponse, UpdateTaskBody};
pub use error::{ApiError, ApiErrorResponse, FieldErrors};
pub use handlers::{create_task, delete_task, get_task, health_check, list_tasks, update_task};
pub use state::{AppState, TaskService};

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Builds the application router with tracing and permissive CORS.
///
/// Request bodies are not size-limited; description length is unbounded.
#[must_use]
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{task_id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
