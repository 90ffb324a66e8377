//! Early-adopter sign-up against the auth/database REST service.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use shared::{
    error::SignupFailure,
    protocol::{
        discount_code_for, EarlyAdopterRecord, ServiceErrorBody, SignUpMetadata, SignUpRequest,
        SignUpResponse, EARLY_ADOPTER_DISCOUNT_CODE,
    },
};
use tracing::{info, warn};

use crate::config::{AuthEndpoint, Settings};

#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse, SignupFailure>;
    async fn insert_record(&self, record: &EarlyAdopterRecord) -> Result<(), SignupFailure>;
}

/// Stand-in used when no service URL or key is configured.
pub struct UnconfiguredAuthBackend;

const NOT_CONFIGURED: &str =
    "Sign-up is unavailable: set CHARTER_AUTH_URL and CHARTER_AUTH_ANON_KEY or add them to portal.toml";

#[async_trait]
impl AuthBackend for UnconfiguredAuthBackend {
    async fn sign_up(&self, _request: &SignUpRequest) -> Result<SignUpResponse, SignupFailure> {
        Err(SignupFailure::NotConfigured(NOT_CONFIGURED.to_string()))
    }

    async fn insert_record(&self, _record: &EarlyAdopterRecord) -> Result<(), SignupFailure> {
        Err(SignupFailure::NotConfigured(NOT_CONFIGURED.to_string()))
    }
}

pub struct RestAuthBackend {
    http: Client,
    base_url: String,
    anon_key: String,
    table: String,
}

impl RestAuthBackend {
    pub fn new(endpoint: &AuthEndpoint) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_seconds))
            .build()
            .context("failed to build sign-up http client")?;
        Ok(Self {
            http,
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            anon_key: endpoint.anon_key.clone(),
            table: endpoint.table.clone(),
        })
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}/{path}", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<ServiceErrorBody>(&body)
        .ok()
        .and_then(ServiceErrorBody::into_message)
        .unwrap_or_else(|| format!("request failed with status {status}"))
}

#[async_trait]
impl AuthBackend for RestAuthBackend {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse, SignupFailure> {
        let response = self
            .post("auth/v1/signup")
            .json(request)
            .send()
            .await
            .map_err(|err| SignupFailure::Transport(format!("sign-up request failed: {err}")))?;
        if !response.status().is_success() {
            return Err(SignupFailure::Account(error_message(response).await));
        }
        let body: Value = response
            .json()
            .await
            .map_err(|err| SignupFailure::Account(format!("malformed sign-up response: {err}")))?;
        SignUpResponse::from_value(body)
            .map_err(|err| SignupFailure::Account(format!("malformed sign-up response: {err}")))
    }

    async fn insert_record(&self, record: &EarlyAdopterRecord) -> Result<(), SignupFailure> {
        let response = self
            .post(&format!("rest/v1/{}", self.table))
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|err| SignupFailure::Record(err.to_string()))?;
        if !response.status().is_success() {
            return Err(SignupFailure::Record(error_message(response).await));
        }
        Ok(())
    }
}

/// Picks the REST backend when the service is configured.
pub fn backend_from_settings(settings: &Settings) -> anyhow::Result<Arc<dyn AuthBackend>> {
    match settings.auth_endpoint()? {
        Some(endpoint) => {
            info!(url = %endpoint.base_url, table = %endpoint.table, "sign-up service configured");
            Ok(Arc::new(RestAuthBackend::new(&endpoint)?))
        }
        None => {
            warn!("sign-up service not configured; submissions will be rejected");
            Ok(Arc::new(UnconfiguredAuthBackend))
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub is_early_adopter: bool,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("is_early_adopter", &self.is_early_adopter)
            .finish()
    }
}

impl Registration {
    pub fn validate(&self) -> Result<(), SignupFailure> {
        if self.email.trim().is_empty() {
            return Err(SignupFailure::Validation("Email is required".into()));
        }
        if self.password.is_empty() {
            return Err(SignupFailure::Validation("Password is required".into()));
        }
        Ok(())
    }

    fn request(&self) -> SignUpRequest {
        SignUpRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            data: SignUpMetadata::new(self.is_early_adopter),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered {
        email: Option<String>,
        discount_code: Option<String>,
    },
    /// The service accepted the request without returning a user; nothing was recorded.
    AwaitingUser,
}

impl RegistrationOutcome {
    pub fn success_message(&self) -> Option<String> {
        match self {
            RegistrationOutcome::Registered { discount_code, .. } => {
                let mut message = "Success! Check your email to verify your account.".to_string();
                if discount_code.is_some() {
                    message.push_str(&format!(
                        " You've received a 15% discount code: {EARLY_ADOPTER_DISCOUNT_CODE}!"
                    ));
                }
                Some(message)
            }
            RegistrationOutcome::AwaitingUser => None,
        }
    }
}

/// Creates the account, then records it. The first failure aborts; an account
/// whose record insert fails is left as is.
pub async fn register(
    backend: &dyn AuthBackend,
    registration: &Registration,
) -> Result<RegistrationOutcome, SignupFailure> {
    registration.validate()?;

    let response = backend.sign_up(&registration.request()).await?;
    let Some(user) = response.user else {
        info!(email = %registration.email, "sign-up accepted without a user");
        return Ok(RegistrationOutcome::AwaitingUser);
    };

    let record = EarlyAdopterRecord::new(user.email.clone(), registration.is_early_adopter);
    backend.insert_record(&record).await.inspect_err(|err| {
        warn!(user_id = %user.id, error = %err, "early adopter record insert failed");
    })?;

    info!(
        user_id = %user.id,
        early_adopter = registration.is_early_adopter,
        "sign-up completed"
    );
    Ok(RegistrationOutcome::Registered {
        email: user.email,
        discount_code: discount_code_for(registration.is_early_adopter),
    })
}

/// Sign-up form state, including the in-flight guard.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub is_early_adopter: bool,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl SignupForm {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn button_label(&self) -> &'static str {
        if self.loading {
            "Signing Up..."
        } else {
            "Join Now"
        }
    }

    /// Validates and marks the form in flight. A validation failure is shown inline.
    pub fn begin_submit(&mut self) -> Result<Registration, SignupFailure> {
        if self.loading {
            return Err(SignupFailure::Validation(
                "A sign-up request is already in progress".into(),
            ));
        }
        let registration = Registration {
            email: self.email.clone(),
            password: self.password.clone(),
            is_early_adopter: self.is_early_adopter,
        };
        self.error = None;
        self.notice = None;
        if let Err(failure) = registration.validate() {
            self.error = Some(failure.to_string());
            return Err(failure);
        }
        self.loading = true;
        Ok(registration)
    }

    /// Applies the result of a submission. Returns true when the flow succeeded.
    pub fn finish(&mut self, result: Result<RegistrationOutcome, SignupFailure>) -> bool {
        self.loading = false;
        match result {
            Ok(outcome) => {
                self.notice = outcome.success_message();
                if matches!(outcome, RegistrationOutcome::Registered { .. }) {
                    self.password.clear();
                    return true;
                }
                false
            }
            Err(failure) => {
                self.error = Some(failure.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/signup_tests.rs"]
mod tests;
