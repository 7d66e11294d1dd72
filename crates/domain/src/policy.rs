use std::collections::BTreeSet;

use crate::PermissionName;

/// One `(permission, label)` pair of an ordered access policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    permission: PermissionName,
    label: String,
}

impl AccessRule {
    /// Creates a rule granting `label` to holders of `permission`.
    #[must_use]
    pub fn new(permission: PermissionName, label: impl Into<String>) -> Self {
        Self {
            permission,
            label: label.into(),
        }
    }

    /// Returns the permission this rule checks.
    #[must_use]
    pub fn permission(&self) -> &PermissionName {
        &self.permission
    }

    /// Returns the label produced when this rule matches.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }
}

/// Ordered rule list evaluated first-match-wins.
///
/// A caller holding several qualifying permissions always receives the
/// earliest matching rule, never the "most specific" one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl AccessPolicy {
    /// Creates a policy from rules in evaluation order.
    #[must_use]
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self { rules }
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[AccessRule] {
        self.rules.as_slice()
    }

    /// Returns the first rule whose permission is in `granted`.
    #[must_use]
    pub fn evaluate(&self, granted: &BTreeSet<PermissionName>) -> Option<&AccessRule> {
        self.rules
            .iter()
            .find(|rule| granted.contains(rule.permission()))
    }
}
