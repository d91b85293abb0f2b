pub mod user_roles;

pub use user_roles::{RoleAction, UserInfo, UserRole, UserRoles};
