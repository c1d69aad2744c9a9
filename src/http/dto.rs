//! Request and response bodies.
//!
//! Request bodies are decoded one known key at a time so that a value of
//! the wrong JSON type is reported against its own field. Unknown keys are
//! ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::error::{ApiErrorResponse, FieldErrors};
use crate::task::{
    domain::{FieldPatch, Task},
    services::{CreateTaskRequest, UpdateTaskRequest},
};

/// Object fields awaiting decoding, plus the errors collected so far.
struct FieldDecoder {
    fields: Map<String, Value>,
    errors: FieldErrors,
}

impl FieldDecoder {
    fn new(body: Value) -> Result<Self, ApiErrorResponse> {
        match body {
            Value::Object(fields) => Ok(Self {
                fields,
                errors: FieldErrors::new(),
            }),
            _ => Err(ApiErrorResponse::validation_error(
                "body",
                "Expected a JSON object",
            )),
        }
    }

    /// Takes `name` out of the object. A type mismatch is recorded against
    /// `name` and the field is treated as absent.
    fn field<T: DeserializeOwned>(&mut self, name: &str) -> FieldPatch<T> {
        let Some(raw) = self.fields.remove(name) else {
            return FieldPatch::Absent;
        };
        serde_json::from_value(raw).unwrap_or_else(|error: serde_json::Error| {
            self.errors
                .entry(name.to_owned())
                .or_default()
                .push(error.to_string());
            FieldPatch::Absent
        })
    }

    fn finish(self) -> Result<(), ApiErrorResponse> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiErrorResponse::invalid_fields(self.errors))
        }
    }
}

/// Body of `POST /tasks`.
///
/// `title` is optional here so a missing title is reported as a field error
/// rather than a body parse failure.
#[derive(Debug, Clone, Default)]
pub struct CreateTaskBody {
    /// Task title.
    pub title: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

impl CreateTaskBody {
    /// Converts the body into a service request, or `None` when the title
    /// is missing.
    #[must_use]
    pub fn into_request(self) -> Option<CreateTaskRequest> {
        let title = self.title?;
        Some(CreateTaskRequest::new(title).with_optional_description(self.description))
    }
}

impl TryFrom<Value> for CreateTaskBody {
    type Error = ApiErrorResponse;

    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let mut decoder = FieldDecoder::new(body)?;
        let title = decoder.field::<String>("title").into_nullable().flatten();
        let description = decoder
            .field::<String>("description")
            .into_nullable()
            .flatten();
        decoder.finish()?;
        Ok(Self { title, description })
    }
}

/// Body of `PUT /tasks/{task_id}`; omitted keys leave the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskBody {
    /// Replacement title.
    pub title: FieldPatch<String>,
    /// Replacement description; `null` clears it.
    pub description: FieldPatch<String>,
    /// Replacement completion flag.
    pub is_completed: FieldPatch<bool>,
}

impl TryFrom<Value> for UpdateTaskBody {
    type Error = ApiErrorResponse;

    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let mut decoder = FieldDecoder::new(body)?;
        let patch = Self {
            title: decoder.field("title"),
            description: decoder.field("description"),
            is_completed: decoder.field("is_completed"),
        };
        decoder.finish()?;
        Ok(patch)
    }
}

impl From<UpdateTaskBody> for UpdateTaskRequest {
    fn from(body: UpdateTaskBody) -> Self {
        Self::from_fields(body.title, body.description, body.is_completed)
    }
}

/// Wire representation of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task identifier.
    pub id: Uuid,
    /// Trimmed title.
    pub title: String,
    /// Description, or `null`.
    pub description: Option<String>,
    /// Completion flag.
    pub is_completed: bool,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp (UTC).
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            is_completed: task.is_completed(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process is serving.
    pub status: String,
}
