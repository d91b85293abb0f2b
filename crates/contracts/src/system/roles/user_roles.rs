use crate::domain::common::ModelType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role groups, as keyed in the `user/roles/` response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Part,
    Stock,
    StockLocation,
}

impl UserRole {
    pub fn key(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Part => "part",
            UserRole::Stock => "stock",
            UserRole::StockLocation => "stock_location",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleAction {
    View,
    Add,
    Change,
    Delete,
}

impl RoleAction {
    pub fn key(&self) -> &'static str {
        match self {
            RoleAction::View => "view",
            RoleAction::Add => "add",
            RoleAction::Change => "change",
            RoleAction::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub pk: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl UserInfo {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Role and permission grants of the current user.
///
/// A role maps to `null` when the user has no access to the group at all.
/// All checks are pure lookups; a superuser passes every check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRoles {
    #[serde(default)]
    pub roles: HashMap<String, Option<Vec<String>>>,
    #[serde(default)]
    pub permissions: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

impl UserRoles {
    pub fn has_role(&self, role: UserRole, action: RoleAction) -> bool {
        if self.is_superuser {
            return true;
        }
        self.roles
            .get(role.key())
            .and_then(|grants| grants.as_ref())
            .map(|grants| grants.iter().any(|g| g == action.key()))
            .unwrap_or(false)
    }

    pub fn has_view_role(&self, role: UserRole) -> bool {
        self.has_role(role, RoleAction::View)
    }

    pub fn has_add_role(&self, role: UserRole) -> bool {
        self.has_role(role, RoleAction::Add)
    }

    pub fn has_change_role(&self, role: UserRole) -> bool {
        self.has_role(role, RoleAction::Change)
    }

    pub fn has_delete_role(&self, role: UserRole) -> bool {
        self.has_role(role, RoleAction::Delete)
    }

    /// Model level permission, independent of role groups
    pub fn has_permission(&self, model: ModelType, action: RoleAction) -> bool {
        if self.is_superuser {
            return true;
        }
        self.permissions
            .get(model.name())
            .map(|actions| actions.iter().any(|a| a == action.key()))
            .unwrap_or(false)
    }

    pub fn has_change_permission(&self, model: ModelType) -> bool {
        self.has_permission(model, RoleAction::Change)
    }

    pub fn is_staff(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> UserRoles {
        serde_json::from_value(serde_json::json!({
            "roles": {
                "stock_location": ["view", "change"],
                "stock": ["view", "change", "add", "delete"],
                "part": null
            },
            "permissions": {
                "stocklocation": ["view", "change"]
            },
            "is_staff": false,
            "is_superuser": false
        }))
        .unwrap()
    }

    #[test]
    fn test_role_lookup() {
        let roles = roles();
        assert!(roles.has_change_role(UserRole::StockLocation));
        assert!(!roles.has_delete_role(UserRole::StockLocation));
        assert!(roles.has_delete_role(UserRole::Stock));
        assert!(roles.has_add_role(UserRole::Stock));
        assert!(!roles.has_add_role(UserRole::StockLocation));
        assert!(!roles.has_view_role(UserRole::Part));
        assert!(!roles.has_view_role(UserRole::Admin));
    }

    #[test]
    fn test_permission_lookup() {
        let roles = roles();
        assert!(roles.has_change_permission(ModelType::StockLocation));
        assert!(!roles.has_change_permission(ModelType::StockItem));
    }

    #[test]
    fn test_superuser_passes_everything() {
        let roles = UserRoles {
            is_superuser: true,
            ..Default::default()
        };
        assert!(roles.has_delete_role(UserRole::StockLocation));
        assert!(roles.has_change_permission(ModelType::Part));
        assert!(roles.is_staff());
    }

    #[test]
    fn test_display_name() {
        let mut user = UserInfo {
            username: "jdoe".into(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "jdoe");
        user.first_name = "Jane".into();
        assert_eq!(user.display_name(), "Jane");
    }
}
