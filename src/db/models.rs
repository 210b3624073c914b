use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// Database representation of a job posting with all fields
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: i64,
    pub designation: String,
    pub description: String,
    pub keywords: String,
    pub company_name: String,
    pub work_experience: i32,
    pub salary: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
