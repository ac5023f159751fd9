use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::User;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: String,
}

/// Body of a successful login; the session token itself rides in the cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: String,
    pub expires_in_sec: u64,
}

/// Session-check response for GET /auth.
#[derive(Debug, Serialize)]
pub struct AuthCheckResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,
}

/// Public part of a user. No password-hash field exists on this type, so no
/// response built from it can leak one.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@x.com".into(),
            password_hash: "$argon2id$not-a-real-hash".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn public_user_never_contains_a_hash() {
        let public = PublicUser::from(sample_user());
        let json = serde_json::to_string(&public).unwrap();
        assert!(json.contains("alice@x.com"));
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn user_row_skips_hash_when_serialized() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn auth_check_omits_user_when_absent() {
        let body = AuthCheckResponse {
            authenticated: false,
            user: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"authenticated":false}"#);
    }

    #[test]
    fn auth_check_includes_user_when_present() {
        let body = AuthCheckResponse {
            authenticated: true,
            user: Some(PublicUser::from(sample_user())),
        };
        let json: serde_json::Value = serde_json::to_value(&body).unwrap();
        assert_eq!(json["authenticated"], true);
        assert_eq!(json["user"]["username"], "alice");
    }

    #[test]
    fn login_response_shape() {
        let body = LoginResponse {
            success: "login successful".into(),
            expires_in_sec: 3600,
        };
        let json: serde_json::Value = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], "login successful");
        assert_eq!(json["expires_in_sec"], 3600);
    }
}
