use crate::db::executor::QueryExecutor;
use crate::db::models::{Account, NewAccount};
use crate::db::schema::INSERT_USER;
use crate::error::StoreError;
use crate::middleware::auth::AccountLookup;

#[cfg(test)]
const FIND_BY_ID: &str =
    "SELECT id, firstName, lastName, emailAddress, password FROM Users WHERE id = ?";
const FIND_BY_EMAIL: &str =
    "SELECT id, firstName, lastName, emailAddress, password FROM Users WHERE emailAddress = ?";
#[cfg(test)]
const DELETE_USER: &str = "DELETE FROM Users WHERE id = ?";

#[derive(Clone)]
pub struct AccountRepository {
    executor: QueryExecutor,
}

impl AccountRepository {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }

    /// Insert an account whose `password` is already hashed. Returns the new id.
    /// A taken email address fails with `UNIQUE_VIOLATION`.
    pub async fn create(&self, account: &NewAccount) -> Result<i64, StoreError> {
        self.executor
            .insert(
                INSERT_USER,
                &[
                    account.first_name.as_str().into(),
                    account.last_name.as_str().into(),
                    account.email_address.as_str().into(),
                    account.password.as_str().into(),
                ],
            )
            .await
    }

    // No route reads or removes accounts by id; these back the store tests.
    #[cfg(test)]
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Account>, StoreError> {
        self.executor
            .fetch_optional(FIND_BY_ID, &[id.into()])
            .await
    }

    /// Exact, case-sensitive match (SQLite's default BINARY collation).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        self.executor
            .fetch_optional(FIND_BY_EMAIL, &[email.into()])
            .await
    }

    /// Remove an account; its courses go with it through the cascading key.
    #[cfg(test)]
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let affected = self
            .executor
            .execute(DELETE_USER, &[id.into()])
            .await?;
        Ok(affected > 0)
    }
}

impl AccountLookup for AccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        AccountRepository::find_by_email(self, email).await
    }
}
