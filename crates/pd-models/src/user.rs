//! User accounts and authentication payloads

use std::fmt;

use chrono::{DateTime, Utc};
use pd_core::types::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Portal roles. Payouts, user management and the audit trail are reserved
/// for administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Staff,
}

impl UserRole {
    pub fn is_admin(self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Staff => "STAFF",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User account as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub role: UserRole,
    pub is_locked: bool,
    pub date_joined: DateTime<Utc>,
    #[serde(default)]
    pub must_change_password: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Login hands back the token pair plus just enough of the user to seed the
/// session; the full record comes from a follow-up profile fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub refresh: String,
    pub access: String,
    pub role: UserRole,
    pub must_change_password: bool,
    pub first_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRefreshResponse {
    pub access: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub old_password: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct UserCreateRequest {
    #[validate(length(min = 1, max = 150, message = "is required"))]
    pub username: String,
    #[validate(email(message = "is not a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub first_name: String,
    pub last_name: String,
    #[validate(length(min = 1, message = "is required"))]
    pub phone_number: String,
    pub role: UserRole,
}

/// Partial update; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UserUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "is not a valid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
}

/// Profile self-service update (role and lock state are admin concerns)
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ProfileUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "is not a valid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// A staff password-reset request awaiting admin resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRecord {
    pub id: Id,
    pub user: Id,
    pub requested_at: DateTime<Utc>,
    pub is_resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub admin_note: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminResetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_casing() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
        let role: UserRole = serde_json::from_str("\"STAFF\"").unwrap();
        assert_eq!(role, UserRole::Staff);
    }

    #[test]
    fn test_login_request_requires_fields() {
        let request = LoginRequest {
            username: String::new(),
            password: "secret".into(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_change_password_length() {
        let request = ChangePasswordRequest {
            old_password: "old-secret".into(),
            new_password: "short".into(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_user_full_name() {
        let body = r#"{
            "id": 7,
            "username": "jdoe",
            "email": "jdoe@example.com",
            "first_name": "Jane",
            "last_name": "Doe",
            "phone_number": "254712345678",
            "role": "STAFF",
            "is_locked": false,
            "date_joined": "2025-01-15T08:30:00Z"
        }"#;
        let user: User = serde_json::from_str(body).unwrap();
        assert_eq!(user.full_name(), "Jane Doe");
        assert!(!user.is_admin());
        assert!(!user.must_change_password);
    }

    #[test]
    fn test_partial_update_skips_absent_fields() {
        let request = UserUpdateRequest {
            is_locked: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"is_locked": true}));
    }
}
