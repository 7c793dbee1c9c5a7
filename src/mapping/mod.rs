use chrono::{DateTime, Utc};

use crate::{
    dto::{CreateNoteRequest, NoteDetailView, NoteListView},
    models::{NewNote, Note},
};

impl From<Note> for NoteListView {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            created_at: note.created_at,
        }
    }
}

impl From<Note> for NoteDetailView {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
        }
    }
}

pub fn to_new_note(request: CreateNoteRequest, created_at: DateTime<Utc>) -> NewNote {
    NewNote {
        title: request.title,
        content: request.content,
        created_at,
    }
}
