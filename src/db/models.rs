use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored account. `password` is always the bcrypt hash.
#[derive(Debug, Clone, PartialEq, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

/// Public projection of an account; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl From<&Account> for AccountSummary {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id,
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
            email_address: a.email_address.clone(),
        }
    }
}

/// Account fields ready for insertion. `password` holds a hash by the time it reaches the store.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    #[sqlx(rename = "userId")]
    pub owner_id: i64,
}

/// Editable course content. Ownership is never part of it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseContent {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub materials_needed: Option<String>,
}

/// A course joined with its owner, as returned by the read routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub owner: AccountSummary,
}

/// Flat row of the `Courses JOIN Users` query.
#[derive(Debug, FromRow)]
pub struct CourseOwnerRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "estimatedTime")]
    pub estimated_time: Option<String>,
    #[sqlx(rename = "materialsNeeded")]
    pub materials_needed: Option<String>,
    #[sqlx(rename = "ownerId")]
    pub owner_id: i64,
    #[sqlx(rename = "ownerFirstName")]
    pub owner_first_name: String,
    #[sqlx(rename = "ownerLastName")]
    pub owner_last_name: String,
    #[sqlx(rename = "ownerEmailAddress")]
    pub owner_email_address: String,
}

impl From<CourseOwnerRow> for CourseDetail {
    fn from(r: CourseOwnerRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            estimated_time: r.estimated_time,
            materials_needed: r.materials_needed,
            owner: AccountSummary {
                id: r.owner_id,
                first_name: r.owner_first_name,
                last_name: r.owner_last_name,
                email_address: r.owner_email_address,
            },
        }
    }
}
