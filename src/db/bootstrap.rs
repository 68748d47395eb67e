//! Drop-and-recreate bootstrap of the `Users` and `Courses` tables.
//!
//! Running it is a full reset: all prior rows are lost. It must finish before
//! the listener is bound, and any failure aborts the remaining steps.

use thiserror::Error as ThisError;
use tracing::info;

use crate::db::executor::{Param, QueryExecutor};
use crate::db::models::NewAccount;
use crate::db::schema::{
    COURSES_TABLE, CREATE_COURSES, CREATE_USERS, DROP_COURSES, DROP_USERS, INSERT_COURSE,
    INSERT_USER, TABLE_EXISTS, USERS_TABLE,
};
use crate::db::seed::{SeedCourse, SeedData};
use crate::error::StoreError;
use crate::service::credential_store::{CredentialStore, HashError};

#[derive(Debug, ThisError)]
pub enum BootstrapError {
    #[error("bootstrap statement failed: {0}")]
    Store(#[from] StoreError),

    #[error("bootstrap could not hash seed passwords: {0}")]
    Hash(#[from] HashError),
}

pub struct SchemaBootstrapper {
    executor: QueryExecutor,
    seed: SeedData,
}

impl SchemaBootstrapper {
    pub fn new(executor: QueryExecutor, seed: SeedData) -> Self {
        Self { executor, seed }
    }

    pub async fn run(&self) -> Result<(), BootstrapError> {
        self.drop_if_exists(USERS_TABLE, DROP_USERS).await?;
        info!("Creating the {} table...", USERS_TABLE);
        self.executor.execute(CREATE_USERS, &[]).await?;

        info!("Hashing the user passwords...");
        let users = hash_passwords(&self.seed.users).await?;

        info!(count = users.len(), "Creating the user records...");
        for user in &users {
            self.create_user(user).await?;
        }

        self.drop_if_exists(COURSES_TABLE, DROP_COURSES).await?;
        info!("Creating the {} table...", COURSES_TABLE);
        self.executor.execute(CREATE_COURSES, &[]).await?;

        info!(count = self.seed.courses.len(), "Creating the course records...");
        for course in &self.seed.courses {
            self.create_course(course).await?;
        }

        info!("Database successfully initialized!");
        Ok(())
    }

    async fn table_exists(&self, table: &str) -> Result<bool, StoreError> {
        info!("Checking if the {} table exists...", table);
        let exists: Option<i64> = self
            .executor
            .retrieve_value(TABLE_EXISTS, &[table.into()])
            .await?;
        Ok(exists.unwrap_or(0) != 0)
    }

    async fn drop_if_exists(&self, table: &str, drop_sql: &str) -> Result<(), StoreError> {
        if self.table_exists(table).await? {
            info!("Dropping the {} table...", table);
            self.executor.execute(drop_sql, &[]).await?;
        }
        Ok(())
    }

    async fn create_user(&self, user: &NewAccount) -> Result<i64, StoreError> {
        self.executor
            .insert(
                INSERT_USER,
                &[
                    user.first_name.as_str().into(),
                    user.last_name.as_str().into(),
                    user.email_address.as_str().into(),
                    user.password.as_str().into(),
                ],
            )
            .await
    }

    async fn create_course(&self, course: &SeedCourse) -> Result<i64, StoreError> {
        self.executor
            .insert(
                INSERT_COURSE,
                &[
                    course.user_id.into(),
                    course.title.as_str().into(),
                    course.description.as_str().into(),
                    Param::from(course.estimated_time.clone()),
                    Param::from(course.materials_needed.clone()),
                ],
            )
            .await
    }
}

async fn hash_passwords(users: &[NewAccount]) -> Result<Vec<NewAccount>, HashError> {
    let mut hashed = Vec::with_capacity(users.len());
    for user in users {
        let password = CredentialStore::hash_async(user.password.clone()).await?;
        hashed.push(NewAccount {
            password,
            ..user.clone()
        });
    }
    Ok(hashed)
}
