use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::permissions::PermissionSet;
use crate::error::{Result, TaskdeskError};

/// Claims carried by the backend's access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Numeric user id
    pub user_id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub role_name: String,
    /// Raw permission claim; usually a stringified list
    #[serde(default)]
    pub role_permissions: serde_json::Value,
    /// Issued at (as UTC timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    /// Expiration time (as UTC timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    /// Token kind, `access` or `refresh`
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl Claims {
    /// Parsed permission claim; malformed input gives an empty set
    pub fn permissions(&self) -> PermissionSet {
        PermissionSet::from_claim(&self.role_permissions)
    }
}

/// Decode a token's claims without checking its signature.
///
/// The client holds no signing key; the backend re-validates every request.
pub fn decode_claims(token: &str) -> Result<Claims> {
    let token = token.trim();
    if token.is_empty() {
        return Err(TaskdeskError::InvalidToken("Token is empty".to_string()));
    }

    if token.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(TaskdeskError::InvalidToken(
            "Token contains invalid characters".to_string(),
        ));
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

/// Format an Authorization header value
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {}", token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn sign(claims: &serde_json::Value) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"server-side-key-the-client-never-sees"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_without_key() {
        let token = sign(&serde_json::json!({
            "user_id": 7,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "role_name": "admin",
            "role_permissions": "['view_project','update_project']",
            "iat": 1,
            "exp": 2,
            "type": "access"
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.token_type.as_deref(), Some("access"));
        assert_eq!(claims.exp, Some(2));
        assert!(claims.permissions().contains("update_project"));
    }

    #[test]
    fn test_missing_permission_claim_is_empty() {
        let token = sign(&serde_json::json!({"user_id": 1, "email": "a@b.com"}));
        let claims = decode_claims(&token).unwrap();
        assert!(claims.permissions().is_empty());
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn test_rejects_non_jwt() {
        assert!(decode_claims("").is_err());
        assert!(decode_claims("not-a-token").is_err());
        assert!(decode_claims("a b.c").is_err());
    }
}
