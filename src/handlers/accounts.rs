use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use tracing::info;

use crate::db::models::AccountSummary;
use crate::error::{ApiError, StoreErrorKind};
use crate::middleware::auth::CurrentAccount;
use crate::middleware::request::JsonBody;
use crate::router::AppState;
use crate::service::credential_store::CredentialStore;
use crate::types::requests::AccountInput;

/// GET /api/users -> the authenticated account.
pub async fn current_user(CurrentAccount(account): CurrentAccount) -> Json<Vec<AccountSummary>> {
    Json(vec![AccountSummary::from(&account)])
}

/// POST /api/users -> create an account; the password is hashed before it reaches the store.
pub async fn create_user(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    let mut account = body.decode::<AccountInput>()?.validate()?;
    account.password = CredentialStore::hash_async(account.password).await?;

    match state.accounts.create(&account).await {
        Ok(id) => {
            info!(id, email = %account.email_address, "account created");
            Ok((StatusCode::CREATED, [(LOCATION, "/")]))
        }
        Err(e) if e.kind == StoreErrorKind::UniqueViolation => Err(ApiError::Conflict(
            "This email is in use already".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}
