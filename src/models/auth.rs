use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_ROLE_ID, GOOGLE_PROVIDER, LOCAL_PROVIDER};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub plain_password: String,
}

/// Body of a successful login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub provider: String,
    pub plain_password: String,
    pub role_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_by_email: Option<String>,
}

impl RegisterRequest {
    /// Local account with the default role; names are capitalised per word
    pub fn new(first_name: &str, last_name: &str, email: &str, plain_password: &str) -> Self {
        Self {
            first_name: capitalize_name(first_name),
            last_name: capitalize_name(last_name),
            email: email.trim().to_string(),
            provider: LOCAL_PROVIDER.to_string(),
            plain_password: plain_password.to_string(),
            role_id: DEFAULT_ROLE_ID,
            created_by_email: None,
            modified_by_email: None,
        }
    }

    /// Complete a Google sign-up from the profile the backend prefilled
    pub fn from_google(prefill: &GooglePrefill, plain_password: &str) -> Self {
        Self {
            provider: GOOGLE_PROVIDER.to_string(),
            ..Self::new(
                &prefill.first_name,
                &prefill.last_name,
                &prefill.email,
                plain_password,
            )
        }
    }

    pub fn with_role(mut self, role_id: i64) -> Self {
        self.role_id = role_id;
        self
    }

    /// Stamp the audit fields when an admin registers someone else
    pub fn registered_by(mut self, actor_email: &str) -> Self {
        self.created_by_email = Some(actor_email.to_string());
        self.modified_by_email = Some(actor_email.to_string());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleLoginRequest {
    pub token: String,
}

/// Profile returned when a Google account has no local user yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GooglePrefill {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

/// Google profiles may lack a given or family name; the backend sends `null`
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw reply of the Google login endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum GoogleLoginResponse {
    Authenticated {
        access_token: String,
    },
    Prefill {
        status: String,
        #[serde(flatten)]
        profile: GooglePrefill,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoogleLoginOutcome {
    /// Known account; carries the access token
    Authenticated(String),
    /// Unknown account; finish registration with this profile
    Register(GooglePrefill),
}

/// "ada LOVELACE  byron" -> "Ada Lovelace Byron"
pub fn capitalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
