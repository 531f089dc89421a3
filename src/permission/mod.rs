//! Named permissions, the authority that grants them and the guard that checks them.

mod authority;
mod domain;
mod guard;

pub use authority::{
    PermissionAuthority, SQLitePermissionAuthority, create_permission_table, get_permissions,
    grant_permission, revoke_permission,
};
pub use domain::Permission;
pub use guard::require_permission;
