//! Domain model for personal task records.
//!
//! The domain owns every field rule (title trimming and length, nullable
//! description, timestamp maintenance) and keeps all infrastructure concerns
//! outside of its boundary.

mod error;
mod ids;
mod patch;
mod task;
mod title;

pub use error::TaskDomainError;
pub use ids::TaskId;
pub use patch::{FieldPatch, TaskPatch};
pub use task::{PersistedTaskData, Task};
pub use title::{MAX_TITLE_LENGTH, TaskTitle, validate_title};
