pub mod config;
pub mod error;
pub mod service;
pub mod router;
pub mod middleware;
pub mod db;
pub mod handlers;
pub mod types;

pub use error::{ApiError, StoreError, StoreErrorKind};
pub use middleware::auth::{AuthOutcome, DenialReason, authenticate};
pub use service::authorization::AuthorizationPolicy;
pub use service::credential_store::CredentialStore;
