use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteListView {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Creation time (UTC)
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteDetailView {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content, may contain markdown
    pub content: String,
    /// Creation time (UTC)
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateNoteRequest {
    /// Note title
    #[validate(custom = "not_blank")]
    pub title: String,
    /// Note content
    #[validate(custom = "not_blank")]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateNoteRequest {
    /// New note title
    #[validate(custom = "not_blank")]
    pub title: String,
    /// New note content
    #[validate(custom = "not_blank")]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarkdownResponse {
    /// Rendered HTML
    pub html: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}
