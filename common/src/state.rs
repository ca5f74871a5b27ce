//! Application state container shared across Axum route handlers.
//!
//! Holds the shared database connection and the external attachment store
//! handle. Cloned cheaply into every handler via Axum's `State<T>` extractor.

use crate::attachments::AttachmentStore;
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    attachments: AttachmentStore,
}

impl AppState {
    pub fn new(db: DatabaseConnection, attachments: AttachmentStore) -> Self {
        Self { db, attachments }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a cloned copy of the database connection, for tasks that need ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    /// Returns a shared reference to the attachment store client.
    pub fn attachments(&self) -> &AttachmentStore {
        &self.attachments
    }
}
