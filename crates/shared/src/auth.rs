//! Authentication claims carried by access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Company ID (current tenant context).
    pub company: Uuid,
    /// User's role within the company.
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, company_id: Uuid, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            company: company_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the company ID from claims.
    #[must_use]
    pub const fn company_id(&self) -> Uuid {
        self.company
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_accessors() {
        let user_id = Uuid::new_v4();
        let company_id = Uuid::new_v4();
        let claims = Claims::new(user_id, company_id, "accountant", Utc::now() + Duration::minutes(15));

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.company_id(), company_id);
        assert_eq!(claims.role, "accountant");
        assert!(claims.exp > claims.iat);
    }
}
