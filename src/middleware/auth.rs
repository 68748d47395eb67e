use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use base64::Engine;
use std::fmt;
use std::future::Future;
use tracing::{info, warn};

use crate::db::models::Account;
use crate::error::{ApiError, StoreError};
use crate::router::AppState;
use crate::service::credential_store::CredentialStore;

/// Resolves an account by its exact email address.
pub trait AccountLookup: Send + Sync {
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Account>, StoreError>> + Send;
}

/// Email/password pair decoded from an `Authorization: Basic ...` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl BasicCredentials {
    /// Decode a raw header value. The scheme is case-insensitive; the payload
    /// is split on the first `:`, so passwords may contain colons.
    pub fn parse(raw: &str) -> Option<Self> {
        let (scheme, payload) = raw.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (email, password) = decoded.split_once(':')?;
        Some(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// Why a request was refused. Only ever logged; callers see a uniform 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    NoCredentials,
    UnknownAccount { email: String },
    BadPassword { email: String },
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => f.write_str("Auth header not found"),
            Self::UnknownAccount { email } => write!(f, "User not found for username: {email}"),
            Self::BadPassword { email } => {
                write!(f, "Authentication failure for username: {email}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Authenticated(Account),
    Denied(DenialReason),
}

/// Resolve the caller from a raw `Authorization` header value.
pub async fn authenticate<L: AccountLookup>(
    lookup: &L,
    raw_header: Option<&str>,
) -> Result<AuthOutcome, ApiError> {
    let Some(creds) = raw_header.and_then(BasicCredentials::parse) else {
        return Ok(AuthOutcome::Denied(DenialReason::NoCredentials));
    };

    let Some(account) = lookup.find_by_email(&creds.email).await? else {
        CredentialStore::verify_placeholder_async(creds.password).await?;
        return Ok(AuthOutcome::Denied(DenialReason::UnknownAccount {
            email: creds.email,
        }));
    };

    let verified = CredentialStore::verify_async(creds.password, account.password.clone()).await?;
    if !verified {
        return Ok(AuthOutcome::Denied(DenialReason::BadPassword {
            email: account.email_address,
        }));
    }

    Ok(AuthOutcome::Authenticated(account))
}

/// Extractor for routes that require a signed-in account.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        match authenticate(&state.accounts, raw).await? {
            AuthOutcome::Authenticated(account) => {
                info!(
                    email = %account.email_address,
                    "Authentication successful"
                );
                Ok(Self(account))
            }
            AuthOutcome::Denied(reason) => {
                warn!(reason = %reason, "Access denied");
                Err(ApiError::Unauthenticated)
            }
        }
    }
}
