pub mod authorization;
pub mod credential_store;
