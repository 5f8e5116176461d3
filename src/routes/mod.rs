//! Router Module Index
//!
//! Groups the endpoints by the access tier the external policy layer applies to
//! them. The grouping is organisational: no tier is enforced inside this service.

/// Routes open to anyone, anonymous callers included.
pub mod public;

/// Routes the policy layer restricts to authenticated callers (RBAC and ReBAC).
pub mod authenticated;

/// Routes the policy layer restricts to the `admin` role.
pub mod admin;
