mod embedded;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use embedded::migrations;

use tokio_postgres::{Client, NoTls, Row};

use crate::models::{NewNote, Note};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("database connection is closed")]
    Closed,
}

/// Persistence for notes, addressed by the storage-assigned id.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create(&self, note: NewNote) -> Result<Note, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Note>, StoreError>;

    /// Returns `false` when no note has the given id.
    async fn update(&self, id: i64, title: String, content: String) -> Result<bool, StoreError>;

    /// Returns `false` when no note has the given id.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

pub struct Repository {
    client: Client,
}

impl Repository {
    pub async fn new(database_dsn: &str) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }

    fn client(&self) -> Result<&Client, StoreError> {
        if self.client.is_closed() {
            return Err(StoreError::Closed);
        }
        Ok(&self.client)
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl NoteStore for Repository {
    async fn create(&self, note: NewNote) -> Result<Note, StoreError> {
        let row = self
            .client()?
            .query_one(
                "INSERT INTO notes (title, content, created_at) VALUES ($1, $2, $3) \
                 RETURNING id, title, content, created_at",
                &[&note.title, &note.content, &note.created_at],
            )
            .await?;

        Ok(note_from_row(&row))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let row = self
            .client()?
            .query_opt(
                "SELECT id, title, content, created_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        let rows = self
            .client()?
            .query(
                "SELECT id, title, content, created_at FROM notes ORDER BY id",
                &[],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn update(&self, id: i64, title: String, content: String) -> Result<bool, StoreError> {
        let rows = self
            .client()?
            .execute(
                "UPDATE notes SET title = $1, content = $2 WHERE id = $3",
                &[&title, &content, &id],
            )
            .await?;

        Ok(rows == 1)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let rows = self
            .client()?
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }
}
