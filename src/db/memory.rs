use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::api::job::JobPayload;
use crate::db::job_repository::JobStore;
use crate::db::models::JobRow;

/// In-process job store used by tests in place of PostgreSQL
#[derive(Default)]
pub struct InMemoryJobStore {
    state: Mutex<State>,
    unavailable: AtomicBool,
}

#[derive(Default)]
struct State {
    next_id: i64,
    rows: BTreeMap<i64, JobRow>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn create(&self, job: &JobPayload) -> Result<JobRow, sqlx::Error> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let now = Utc::now().naive_utc();
        let row = JobRow {
            id: state.next_id,
            designation: job.designation.clone(),
            description: job.description.clone(),
            keywords: job.keywords.clone(),
            company_name: job.company_name.clone(),
            work_experience: job.work_experience,
            salary: job.salary,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<JobRow>, sqlx::Error> {
        self.check()?;
        Ok(self.state.lock().unwrap().rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<JobRow>, sqlx::Error> {
        self.check()?;
        Ok(self.state.lock().unwrap().rows.values().cloned().collect())
    }

    async fn update(&self, id: i64, job: &JobPayload) -> Result<Option<JobRow>, sqlx::Error> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        Ok(state.rows.get_mut(&id).map(|row| {
            row.designation = job.designation.clone();
            row.description = job.description.clone();
            row.keywords = job.keywords.clone();
            row.company_name = job.company_name.clone();
            row.work_experience = job.work_experience;
            row.salary = job.salary;
            row.updated_at = Utc::now().naive_utc();
            row.clone()
        }))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, sqlx::Error> {
        self.check()?;
        Ok(self.state.lock().unwrap().rows.remove(&id).is_some())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, sqlx::Error> {
        self.check()?;
        Ok(self.state.lock().unwrap().rows.contains_key(&id))
    }

    async fn search_by_term(&self, term: &str) -> Result<Vec<JobRow>, sqlx::Error> {
        self.check()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .rows
            .values()
            .filter(|row| {
                contains_ignore_case(&row.designation, term)
                    || contains_ignore_case(&row.company_name, term)
                    || contains_ignore_case(&row.description, term)
                    || contains_ignore_case(&row.keywords, term)
            })
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.check()
    }
}
