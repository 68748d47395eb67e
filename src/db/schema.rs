//! SQL DDL and seed statements for the two tables.
//!
//! `Courses.userId` references `Users.id` with cascading delete and update, so
//! `Users` must exist and be populated before `Courses` is created or filled.

pub const USERS_TABLE: &str = "Users";
pub const COURSES_TABLE: &str = "Courses";

pub const TABLE_EXISTS: &str = r#"
SELECT EXISTS (
    SELECT 1
    FROM sqlite_master
    WHERE type = 'table' AND name = ?
)
"#;

pub const DROP_USERS: &str = "DROP TABLE IF EXISTS Users";
pub const DROP_COURSES: &str = "DROP TABLE IF EXISTS Courses";

pub const CREATE_USERS: &str = r#"
CREATE TABLE Users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    firstName VARCHAR(255) NOT NULL DEFAULT '',
    lastName VARCHAR(255) NOT NULL DEFAULT '',
    emailAddress VARCHAR(255) NOT NULL DEFAULT '' UNIQUE,
    password VARCHAR(255) NOT NULL DEFAULT '',
    createdAt DATETIME NOT NULL,
    updatedAt DATETIME NOT NULL
)
"#;

pub const CREATE_COURSES: &str = r#"
CREATE TABLE Courses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(255) NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    estimatedTime VARCHAR(255),
    materialsNeeded VARCHAR(255),
    createdAt DATETIME NOT NULL,
    updatedAt DATETIME NOT NULL,
    userId INTEGER NOT NULL DEFAULT -1
        REFERENCES Users (id) ON DELETE CASCADE ON UPDATE CASCADE
)
"#;

pub const INSERT_USER: &str = r#"
INSERT INTO Users
    (firstName, lastName, emailAddress, password, createdAt, updatedAt)
VALUES
    (?, ?, ?, ?, datetime('now'), datetime('now'))
"#;

pub const INSERT_COURSE: &str = r#"
INSERT INTO Courses
    (userId, title, description, estimatedTime, materialsNeeded, createdAt, updatedAt)
VALUES
    (?, ?, ?, ?, ?, datetime('now'), datetime('now'))
"#;
