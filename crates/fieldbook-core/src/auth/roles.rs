//! Role parsing and the permission checks the dashboard consumes
//!
//! Policy lives on the backend; these checks only decide what to offer
//! locally so obviously forbidden actions fail before a request is made.

use std::fmt;

use serde::{Deserialize, Serialize};

/// User role as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    SuperAdmin,
    SalesSupervisor,
    Salesman,
    /// Anything the backend sends that we do not recognise (normalised form)
    Other(String),
}

impl Role {
    /// Parse a role string, tolerating case, whitespace and admin/supervisor aliases
    pub fn parse(raw: &str) -> Self {
        let normalized = raw
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();

        match normalized.as_str() {
            "super_admin" | "superadmin" | "admin" => Role::SuperAdmin,
            "sales_supervisor" | "supervisor" => Role::SalesSupervisor,
            "salesman" => Role::Salesman,
            _ => Role::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::SalesSupervisor => "sales_supervisor",
            Role::Salesman => "salesman",
            Role::Other(raw) => raw,
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    pub fn is_supervisor(&self) -> bool {
        matches!(self, Role::SalesSupervisor)
    }

    /// Edit forms are offered to admins and supervisors
    pub fn can_edit(&self) -> bool {
        self.is_super_admin() || self.is_supervisor()
    }

    /// Delete buttons are offered to admins only
    pub fn can_delete(&self) -> bool {
        self.is_super_admin()
    }

    pub fn can_manage_team(&self) -> bool {
        self.is_super_admin() || self.is_supervisor()
    }

    pub fn can_manage_users(&self) -> bool {
        self.is_super_admin()
    }

    pub fn can_view_settings(&self) -> bool {
        self.is_super_admin()
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::parse(&raw)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
