use async_trait::async_trait;

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicBool, Ordering},
};

use crate::models::{NewNote, Note};

use super::{NoteStore, StoreError};

#[derive(Default)]
struct Table {
    next_id: i64,
    notes: BTreeMap<i64, Note>,
}

/// `NoteStore` kept in process memory, used to drive the service and
/// handlers in tests without a database.
#[derive(Default)]
pub struct MemoryStore {
    table: tokio::sync::Mutex<Table>,
    closed: AtomicBool,
    read_only: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail like a dropped database connection.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Lets lookups through but fails inserts, updates and deletes.
    pub fn reject_writes(&self) {
        self.read_only.store(true, Ordering::SeqCst);
    }

    fn check_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        self.check_open()?;
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create(&self, note: NewNote) -> Result<Note, StoreError> {
        self.check_writable()?;
        let mut table = self.table.lock().await;
        table.next_id += 1;

        let stored = Note {
            id: table.next_id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
        };
        table.notes.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError> {
        self.check_open()?;
        Ok(self.table.lock().await.notes.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        self.check_open()?;
        Ok(self.table.lock().await.notes.values().cloned().collect())
    }

    async fn update(&self, id: i64, title: String, content: String) -> Result<bool, StoreError> {
        self.check_writable()?;
        let mut table = self.table.lock().await;

        match table.notes.get_mut(&id) {
            Some(note) => {
                note.title = title;
                note.content = content;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.check_writable()?;
        Ok(self.table.lock().await.notes.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    fn new_note(title: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: "body".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_in_insert_order() {
        let store = MemoryStore::new();
        let first = store.create(new_note("a")).await.unwrap();
        let second = store.create(new_note("b")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_ids_report_false() {
        let store = MemoryStore::new();
        assert!(!store.update(42, "t".into(), "c".into()).await.unwrap());
        assert!(!store.delete(42).await.unwrap());
        assert!(store.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn closed_store_fails_every_call() {
        let store = MemoryStore::new();
        store.close();
        assert!(matches!(
            store.create(new_note("a")).await,
            Err(StoreError::Closed)
        ));
        assert!(store.find_all().await.is_err());
    }

    #[tokio::test]
    async fn rejected_writes_leave_reads_working() {
        let store = MemoryStore::new();
        let note = store.create(new_note("a")).await.unwrap();
        store.reject_writes();

        assert!(store.find_by_id(note.id).await.unwrap().is_some());
        assert!(store.update(note.id, "t".into(), "c".into()).await.is_err());
        assert!(store.delete(note.id).await.is_err());
        assert!(store.create(new_note("b")).await.is_err());
    }
}
