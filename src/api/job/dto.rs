use serde::Serialize;
use crate::db::models::JobRow;

/// Response for a created job
#[derive(Serialize)]
pub struct JobResponse {
    pub message: String,
    pub job: JobRow,
}

/// Plain confirmation for update, delete and apply
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
