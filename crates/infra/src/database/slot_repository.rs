//! SQLite-backed implementation of the SlotRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{Connection, ToSql};
use slotbook_core::SlotRepository as SlotRepositoryPort;
use slotbook_domain::{Result as DomainResult, SlotDraft, SlotRecordId, SlotbookError};
use tokio::task;
use tracing::instrument;

use super::manager::DbManager;
use crate::errors::InfraError;

/// SQLite implementation of `SlotRepository`
pub struct SqliteSlotRepository {
    db: Arc<DbManager>,
}

impl SqliteSlotRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SlotRepositoryPort for SqliteSlotRepository {
    #[instrument(skip(self, draft), fields(slot_start = %draft.start))]
    async fn create_slot(&self, draft: &SlotDraft) -> DomainResult<SlotRecordId> {
        let db = Arc::clone(&self.db);
        let draft = draft.clone();

        task::spawn_blocking(move || -> DomainResult<SlotRecordId> {
            let conn = db.get_connection()?;
            insert_slot(&conn, &draft)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn attach_external_id(
        &self,
        id: &SlotRecordId,
        external_event_id: &str,
    ) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let id = id.clone();
        let external_event_id = external_event_id.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            update_external_id(&conn, &id, &external_event_id)
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// SQL Operations (synchronous)
// =============================================================================

/// Insert a slot row, generating a fresh record id.
fn insert_slot(conn: &Connection, draft: &SlotDraft) -> DomainResult<SlotRecordId> {
    let record_id = SlotRecordId::generate();
    let id_text = record_id.to_string();
    let start_ts = draft.start.timestamp();
    let end_ts = draft.end.timestamp();
    let now = Utc::now().timestamp();

    let params: [&dyn ToSql; 7] =
        [&id_text, &draft.title, &draft.description, &start_ts, &end_ts, &now, &now];

    conn.execute(
        "INSERT INTO slots (id, title, description, start_ts, end_ts, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params.as_slice(),
    )
    .map_err(|err| match SlotbookError::from(InfraError::from(err)) {
        SlotbookError::DuplicateSlot(_) => SlotbookError::DuplicateSlot(format!(
            "slot starting at {} already exists",
            draft.start.to_rfc3339()
        )),
        other => other,
    })?;

    Ok(record_id)
}

/// Record the provider event id on an existing slot row.
fn update_external_id(
    conn: &Connection,
    id: &SlotRecordId,
    external_event_id: &str,
) -> DomainResult<()> {
    let now = Utc::now().timestamp();
    let id_text = id.as_str();

    let params: [&dyn ToSql; 3] = [&external_event_id, &now, &id_text];

    let rows = conn
        .execute(
            "UPDATE slots SET external_event_id = ?1, updated_at = ?2 WHERE id = ?3",
            params.as_slice(),
        )
        .map_err(map_sql_error)?;

    if rows == 0 {
        return Err(SlotbookError::NotFound(format!("slot {} not found", id)));
    }

    Ok(())
}

// =============================================================================
// Error Mapping
// =============================================================================

fn map_sql_error(err: rusqlite::Error) -> SlotbookError {
    SlotbookError::from(InfraError::from(err))
}

fn map_join_error(err: task::JoinError) -> SlotbookError {
    SlotbookError::Internal(format!("Task join error: {err}"))
}

// =============================================================================
// Tests
// =============================================================================
