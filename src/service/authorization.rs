use crate::db::models::Course;
use crate::error::ApiError;

/// Mutations gated by ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Update,
    Delete,
}

impl Mutation {
    fn verb(self) -> &'static str {
        match self {
            Mutation::Update => "update",
            Mutation::Delete => "delete",
        }
    }
}

/// Outcome of an ownership check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    pub allowed: bool,
    pub message: Option<String>,
}

pub struct AuthorizationPolicy;

impl AuthorizationPolicy {
    /// Only the owning account may change or remove a course.
    pub fn can_mutate(course: &Course, account_id: i64) -> bool {
        course.owner_id == account_id
    }

    pub fn check(course: &Course, account_id: i64, mutation: Mutation) -> Authorization {
        if Self::can_mutate(course, account_id) {
            Authorization {
                allowed: true,
                message: None,
            }
        } else {
            Authorization {
                allowed: false,
                message: Some(format!(
                    "You're not the owner so can't {} this course!",
                    mutation.verb()
                )),
            }
        }
    }

    /// [`AuthorizationPolicy::check`] as a 403 for handlers.
    pub fn ensure(course: &Course, account_id: i64, mutation: Mutation) -> Result<(), ApiError> {
        match Self::check(course, account_id, mutation) {
            Authorization { allowed: true, .. } => Ok(()),
            Authorization { message, .. } => Err(ApiError::Forbidden(message.unwrap_or_default())),
        }
    }
}
