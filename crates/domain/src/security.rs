use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rolegate_core::{AppError, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Longest accepted role or permission name, in characters.
pub const NAME_MAX_LENGTH: usize = 255;

fn validated_name(kind: &str, value: &str) -> Result<NonEmptyString, AppError> {
    let trimmed = value.trim();
    if trimmed.chars().count() > NAME_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "{kind} name must be at most {NAME_MAX_LENGTH} characters"
        )));
    }

    NonEmptyString::new(trimmed)
        .map_err(|_| AppError::Validation(format!("{kind} name must not be empty")))
}

/// Unique role name. Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(NonEmptyString);

impl RoleName {
    /// Creates a trimmed, validated role name.
    pub fn new(value: impl AsRef<str>) -> Result<Self, AppError> {
        validated_name("role", value.as_ref()).map(Self)
    }

    /// Returns the stored name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Unique permission name. Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionName(NonEmptyString);

impl PermissionName {
    /// Creates a trimmed, validated permission name.
    pub fn new(value: impl AsRef<str>) -> Result<Self, AppError> {
        validated_name("permission", value.as_ref()).map(Self)
    }

    /// Returns the stored name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

macro_rules! name_conversions {
    ($name:ident) => {
        impl FromStr for $name {
            type Err = AppError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = AppError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.into()
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                formatter.write_str(self.as_str())
            }
        }
    };
}

name_conversions!(RoleName);
name_conversions!(PermissionName);

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a role's permission set is replaced.
    SecurityRolePermissionsSynced,
    /// Emitted when a role is attached to a subject.
    SecuritySubjectRoleAssigned,
    /// Emitted when a seed plan is applied.
    SecurityCatalogSeeded,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SecurityRolePermissionsSynced => "security.role.permissions_synced",
            Self::SecuritySubjectRoleAssigned => "security.subject_role.assigned",
            Self::SecurityCatalogSeeded => "security.catalog.seeded",
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{NAME_MAX_LENGTH, PermissionName, RoleName};

    #[test]
    fn role_name_is_trimmed() {
        let name = RoleName::new("  Admin ");
        assert_eq!(name.ok().map(String::from), Some("Admin".to_owned()));
    }

    #[test]
    fn blank_permission_name_is_rejected() {
        assert!(PermissionName::new(" \t ").is_err());
    }

    #[test]
    fn overlong_role_name_is_rejected() {
        let value = "r".repeat(NAME_MAX_LENGTH + 1);
        assert!(RoleName::new(value).is_err());
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_ne!(RoleName::new("admin").ok(), RoleName::new("Admin").ok());
    }

    #[test]
    fn owned_conversion_runs_validation() {
        assert!(PermissionName::try_from("   ".to_owned()).is_err());
        assert!(PermissionName::try_from("view_user_data".to_owned()).is_ok());
    }

    proptest! {
        #[test]
        fn accepted_names_never_carry_surrounding_whitespace(raw in "\\PC{0,40}") {
            if let Ok(name) = PermissionName::new(raw.as_str()) {
                prop_assert_eq!(name.as_str(), name.as_str().trim());
                prop_assert!(!name.as_str().is_empty());
            }
        }
    }
}
