use serde::{Deserialize, Serialize};

/// Caller identity established by the upstream authentication collaborator.
///
/// Only the stable subject is carried. Role membership is resolved from the
/// authorization store when a decision is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
}

impl UserIdentity {
    /// Creates a user identity from an authenticated subject.
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    /// Identity used for provisioning work performed outside a request.
    #[must_use]
    pub fn system() -> Self {
        Self::new("system")
    }

    /// Returns the stable subject claim.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }
}
