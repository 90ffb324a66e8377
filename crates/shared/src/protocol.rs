//! Wire types for the auth/database REST service used by sign-up.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EARLY_ADOPTER_DISCOUNT_CODE: &str = "EARLY15";

pub fn discount_code_for(is_early_adopter: bool) -> Option<String> {
    is_early_adopter.then(|| EARLY_ADOPTER_DISCOUNT_CODE.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpMetadata {
    #[serde(rename = "isEarlyAdopter")]
    pub is_early_adopter: bool,
    #[serde(rename = "discountCode")]
    pub discount_code: Option<String>,
}

impl SignUpMetadata {
    pub fn new(is_early_adopter: bool) -> Self {
        Self {
            is_early_adopter,
            discount_code: discount_code_for(is_early_adopter),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub data: SignUpMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Parsed sign-up response. The service answers either `{ "user": {...}, "session": ... }`
/// or, when email confirmation is pending, the bare user object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpResponse {
    pub user: Option<AuthUser>,
}

impl SignUpResponse {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if let Some(user) = value.get("user") {
            if user.is_null() {
                return Ok(Self { user: None });
            }
            let user = serde_json::from_value(user.clone())?;
            return Ok(Self { user: Some(user) });
        }
        if value.get("id").is_some() {
            let user = serde_json::from_value(value)?;
            return Ok(Self { user: Some(user) });
        }
        Ok(Self { user: None })
    }
}

/// Row written to the early adopters table after a successful sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyAdopterRecord {
    pub email: Option<String>,
    pub is_early_adopter: bool,
    pub discount_code: Option<String>,
}

impl EarlyAdopterRecord {
    pub fn new(email: Option<String>, is_early_adopter: bool) -> Self {
        Self {
            email,
            is_early_adopter,
            discount_code: discount_code_for(is_early_adopter),
        }
    }
}

/// Error body shapes returned by the service. Only one field is usually set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ServiceErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}
