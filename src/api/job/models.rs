use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::db::models::JobRow;

/// Request body for creating or overwriting a job posting
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    #[validate(custom(function = "not_blank", message = "Designation must not be blank"))]
    pub designation: String,
    #[validate(custom(function = "not_blank", message = "Description must not be blank"))]
    pub description: String,
    #[validate(custom(function = "not_blank", message = "Keywords must not be blank"))]
    pub keywords: String,
    #[validate(custom(function = "not_blank", message = "Company name must not be blank"))]
    pub company_name: String,
    #[validate(range(min = 0, message = "Work experience must not be negative"))]
    pub work_experience: i32,
    #[validate(range(min = 0, message = "Salary must not be negative"))]
    pub salary: i64,
}

/// Rejects empty and whitespace-only text
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Accepts exactly the addresses the mail transport can address a message to
fn deliverable_mailbox(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Mailbox>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("email"))
}

/// Query parameters for the advanced filter; an absent field leaves that
/// dimension unconstrained
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    pub keyword: Option<String>,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
}

impl JobFilter {
    /// All constraints are ANDed; the keyword matches any of the four text fields
    pub fn matches(&self, job: &JobRow) -> bool {
        self.matches_keyword(job)
            && self.min_salary.map_or(true, |min| job.salary >= min)
            && self.max_salary.map_or(true, |max| job.salary <= max)
            && self.min_experience.map_or(true, |min| job.work_experience >= min)
            && self.max_experience.map_or(true, |max| job.work_experience <= max)
    }

    fn matches_keyword(&self, job: &JobRow) -> bool {
        let Some(keyword) = &self.keyword else {
            return true;
        };
        let keyword = keyword.to_lowercase();
        [
            &job.designation,
            &job.company_name,
            &job.description,
            &job.keywords,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&keyword))
    }
}

/// Query parameters for applying to a job
#[derive(Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyParams {
    #[validate(custom(function = "deliverable_mailbox", message = "applicantEmail must be a valid email address"))]
    pub applicant_email: String,
}
