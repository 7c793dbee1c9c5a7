pub mod checker;
pub mod markdown;

use chrono::Utc;

use std::sync::Arc;

use checker::GrammarChecker;

use crate::{
    dto::{CreateNoteRequest, NoteDetailView, NoteListView, UpdateNoteRequest},
    mapping,
    repository::NoteStore,
};

/// Everything the HTTP layer may do with notes. Storage and checker failures
/// are logged here and surface as `false` or an empty result.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
    checker: GrammarChecker,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>, checker: GrammarChecker) -> Self {
        Self { store, checker }
    }

    pub async fn list_all(&self) -> Vec<NoteListView> {
        match self.store.find_all().await {
            Ok(notes) => notes.into_iter().map(NoteListView::from).collect(),
            Err(e) => {
                tracing::error!("failed to list notes: {e}");
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Option<NoteDetailView> {
        match self.store.find_by_id(id).await {
            Ok(note) => note.map(NoteDetailView::from),
            Err(e) => {
                tracing::error!("failed to get note {id}: {e}");
                None
            }
        }
    }

    /// Looks a note up for a write. `None` means the store could not answer,
    /// so callers can tell an outage apart from a missing note.
    pub async fn exists(&self, id: i64) -> Option<bool> {
        match self.store.find_by_id(id).await {
            Ok(note) => Some(note.is_some()),
            Err(e) => {
                tracing::error!("failed to look up note {id}: {e}");
                None
            }
        }
    }

    pub async fn create(&self, request: CreateNoteRequest) -> bool {
        let note = mapping::to_new_note(request, Utc::now());

        match self.store.create(note).await {
            Ok(note) => {
                tracing::info!("created note {}", note.id);
                true
            }
            Err(e) => {
                tracing::error!("failed to create note: {e}");
                false
            }
        }
    }

    pub async fn update(&self, id: i64, request: UpdateNoteRequest) -> bool {
        match self.store.update(id, request.title, request.content).await {
            Ok(updated) => updated,
            Err(e) => {
                tracing::error!("failed to update note {id}: {e}");
                false
            }
        }
    }

    pub async fn delete(&self, id: i64) -> bool {
        match self.store.delete(id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                tracing::error!("failed to delete note {id}: {e}");
                false
            }
        }
    }

    /// Renders a stored note. `None` when the note does not exist; an existing
    /// note may still render to an empty string.
    pub async fn render_markdown(&self, id: i64) -> Option<String> {
        self.get_by_id(id)
            .await
            .map(|note| markdown::render(&note.content))
    }

    pub fn render_markdown_content(content: &str) -> String {
        markdown::render(content)
    }

    /// Grammar-checks a stored note. Empty when the note does not exist, in
    /// which case the checker is never called.
    pub async fn check_grammar(&self, id: i64) -> String {
        match self.get_by_id(id).await {
            Some(note) => self.check_grammar_content(&note.content).await,
            None => String::new(),
        }
    }

    /// Returns the checker's raw body, or a description of why the check
    /// failed.
    pub async fn check_grammar_content(&self, content: &str) -> String {
        match self.checker.check(&content.to_lowercase()).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("grammar check failed: {e}");
                e.to_string()
            }
        }
    }
}
