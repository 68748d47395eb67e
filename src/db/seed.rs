use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error as ThisError;
use tracing::info;

use crate::db::models::NewAccount;

const BUNDLED_SEED: &str = include_str!("../../seed/data.json");

#[derive(Debug, ThisError)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid seed document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Seed course. `user_id` refers to the 1-based insertion order of the seed users.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedCourse {
    pub user_id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub materials_needed: Option<String>,
}

/// Seed document; `users` carry plaintext passwords until bootstrap hashes them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedData {
    pub users: Vec<NewAccount>,
    pub courses: Vec<SeedCourse>,
}

impl SeedData {
    pub fn bundled() -> Result<Self, SeedError> {
        Ok(serde_json::from_str(BUNDLED_SEED)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load from `path` when given, falling back to the bundled document.
    pub fn load(path: Option<&Path>) -> Result<Self, SeedError> {
        match path {
            Some(p) => {
                info!(path = %p.display(), "loading seed data from file");
                Self::from_file(p)
            }
            None => Self::bundled(),
        }
    }
}
