//! Auth Models

use jiff::Timestamp;
use uuid::Uuid;

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A regular storefront customer.
    Customer,

    /// A staff account with full access.
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub fn from_str_or_customer(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            _ => Self::Customer,
        }
    }
}

/// The authenticated caller of a service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// The user this actor acts as.
    pub user: Uuid,

    /// The actor's role.
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub fn is_admin(self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this actor may operate on a resource owned by `owner`.
    #[must_use]
    pub fn may_access(self, owner: Uuid) -> bool {
        self.user == owner || self.is_admin()
    }
}

/// User Model
#[derive(Debug, Clone)]
pub struct User {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New User Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub token_hash: Option<String>,
}
