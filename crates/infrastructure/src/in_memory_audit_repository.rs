use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use rolegate_application::{AuditEvent, AuditRepository};
use rolegate_core::AppResult;

/// Audit event as recorded by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogRecord {
    /// Stable event identifier.
    pub event_id: Uuid,
    /// Time the event was appended.
    pub created_at: DateTime<Utc>,
    /// Appended event payload.
    pub event: AuditEvent,
}

/// In-memory append-only audit repository.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    entries: RwLock<Vec<AuditLogRecord>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty audit repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns appended events, oldest first.
    pub async fn entries(&self) -> Vec<AuditLogRecord> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.entries.write().await.push(AuditLogRecord {
            event_id: Uuid::new_v4(),
            created_at: Utc::now(),
            event,
        });
        Ok(())
    }
}
