pub mod accounts;
pub mod courses;
