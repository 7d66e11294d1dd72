//! Domain entities and invariants.

#![forbid(unsafe_code)]

pub mod catalog;
mod policy;
mod security;

pub use policy::{AccessPolicy, AccessRule};
pub use security::{AuditAction, NAME_MAX_LENGTH, PermissionName, RoleName};
