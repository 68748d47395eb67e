use crate::db::executor::{Param, QueryExecutor};
use crate::db::models::{Course, CourseContent, CourseDetail, CourseOwnerRow};
use crate::db::schema::INSERT_COURSE;
use crate::error::{StoreError, StoreErrorKind};

const LIST_WITH_OWNER: &str = r#"
SELECT c.id, c.title, c.description, c.estimatedTime, c.materialsNeeded,
       u.id AS ownerId, u.firstName AS ownerFirstName,
       u.lastName AS ownerLastName, u.emailAddress AS ownerEmailAddress
FROM Courses c
JOIN Users u ON u.id = c.userId
ORDER BY c.id
"#;

const FIND_WITH_OWNER: &str = r#"
SELECT c.id, c.title, c.description, c.estimatedTime, c.materialsNeeded,
       u.id AS ownerId, u.firstName AS ownerFirstName,
       u.lastName AS ownerLastName, u.emailAddress AS ownerEmailAddress
FROM Courses c
JOIN Users u ON u.id = c.userId
WHERE c.id = ?
"#;

const FIND_COURSE: &str = r#"
SELECT id, title, description, estimatedTime, materialsNeeded, userId
FROM Courses WHERE id = ?
"#;

const UPDATE_COURSE: &str = r#"
UPDATE Courses SET
    title = ?,
    description = ?,
    estimatedTime = ?,
    materialsNeeded = ?,
    updatedAt = datetime('now')
WHERE id = ?
"#;

const DELETE_COURSE: &str = "DELETE FROM Courses WHERE id = ?";

#[derive(Clone)]
pub struct CourseRepository {
    executor: QueryExecutor,
}

impl CourseRepository {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }

    pub async fn list_with_owner(&self) -> Result<Vec<CourseDetail>, StoreError> {
        let rows: Vec<CourseOwnerRow> = self.executor.fetch_all(LIST_WITH_OWNER, &[]).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_with_owner(&self, id: i64) -> Result<Option<CourseDetail>, StoreError> {
        let row: Option<CourseOwnerRow> = self
            .executor
            .fetch_optional(FIND_WITH_OWNER, &[id.into()])
            .await?;
        Ok(row.map(Into::into))
    }

    pub async fn find(&self, id: i64) -> Result<Option<Course>, StoreError> {
        self.executor.fetch_optional(FIND_COURSE, &[id.into()]).await
    }

    /// Insert a course owned by `owner_id`. An unknown owner fails with `FK_VIOLATION`.
    pub async fn create(&self, owner_id: i64, content: &CourseContent) -> Result<i64, StoreError> {
        self.executor
            .insert(
                INSERT_COURSE,
                &[
                    owner_id.into(),
                    content.title.as_str().into(),
                    content.description.as_str().into(),
                    Param::from(content.estimated_time.clone()),
                    Param::from(content.materials_needed.clone()),
                ],
            )
            .await
    }

    /// Replace the editable fields; the owner column is left untouched.
    pub async fn update(&self, id: i64, content: &CourseContent) -> Result<(), StoreError> {
        let affected = self
            .executor
            .execute(
                UPDATE_COURSE,
                &[
                    content.title.as_str().into(),
                    content.description.as_str().into(),
                    Param::from(content.estimated_time.clone()),
                    Param::from(content.materials_needed.clone()),
                    id.into(),
                ],
            )
            .await?;
        not_found_if_zero(affected, id)
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let affected = self.executor.execute(DELETE_COURSE, &[id.into()]).await?;
        not_found_if_zero(affected, id)
    }
}

fn not_found_if_zero(affected: u64, id: i64) -> Result<(), StoreError> {
    if affected == 0 {
        return Err(StoreError::new(
            StoreErrorKind::NotFound,
            format!("no course with id {id}"),
        ));
    }
    Ok(())
}
