use db::models::user::Role;
use serde::{Deserialize, Serialize};

/// Caller identity resolved from the bearer token. The core never verifies
/// credentials on protected routes; it only consumes these resolved claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub name: String,
    pub role: String,
    pub office: Option<String>,
    pub email: String,
    pub exp: usize,
}

impl Claims {
    /// Resolves the claimed role into the enumerated type exactly once.
    ///
    /// Fails closed: a missing or malformed role string degrades to
    /// `Employee`, the most restrictive scope, never to wider visibility.
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Employee)
    }

    pub fn office(&self) -> Option<&str> {
        self.office.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
