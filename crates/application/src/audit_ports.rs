use async_trait::async_trait;
use rolegate_core::AppResult;
use rolegate_domain::AuditAction;
use tracing::warn;

/// Immutable audit event payload emitted by application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Subject that performed the action.
    pub subject: String,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Optional audit detail payload.
    pub detail: Option<String>,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}

/// Appends `event` after the audited write has already committed.
///
/// A failed append is logged and never turns a committed write into an error.
pub(crate) async fn append_committed_event(repository: &dyn AuditRepository, event: AuditEvent) {
    let action = event.action.as_str();
    let resource_id = event.resource_id.clone();
    if let Err(error) = repository.append_event(event).await {
        warn!(action, %resource_id, %error, "failed to append audit event");
    }
}
