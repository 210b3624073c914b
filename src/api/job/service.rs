use std::sync::Arc;

use tracing::{error, info, warn};
use validator::Validate;

use crate::api::error::ServiceError;
use crate::db::{JobRow, JobStore};
use crate::notify::{ApplicationReceived, Attachments, Notifier, NotifyError};
use super::models::{JobFilter, JobPayload};

/// Job service containing business logic
///
/// Store and notifier are process-scoped handles shared across actix workers.
pub struct JobService {
    store: Arc<dyn JobStore>,
    notifier: Arc<dyn Notifier>,
    attachments: Attachments,
}

impl JobService {
    /// Create a new JobService instance
    pub fn new(store: Arc<dyn JobStore>, notifier: Arc<dyn Notifier>, attachments: Attachments) -> Self {
        Self {
            store,
            notifier,
            attachments,
        }
    }

    /// Create a job posting
    ///
    /// # Returns
    /// - `Ok(JobRow)` - the stored job with its assigned id
    /// - `Err(ServiceError)` - validation or database failure
    pub async fn add_job(&self, job: &JobPayload) -> Result<JobRow, ServiceError> {
        validate(job)?;

        let row = self.store.create(job).await.map_err(|e| {
            error!("Service: Error adding job {}: {}", job.designation, e);
            ServiceError::Database(e)
        })?;

        info!("Service: Job added successfully: id={}, designation={}", row.id, row.designation);
        Ok(row)
    }

    pub async fn get_job_by_id(&self, id: i64) -> Result<JobRow, ServiceError> {
        let job = self.store.find_by_id(id).await.map_err(|e| {
            error!("Service: Error fetching job with id {}: {}", id, e);
            ServiceError::Database(e)
        })?;

        match job {
            Some(job) => {
                info!("Service: Job found with id: {}", id);
                Ok(job)
            }
            None => {
                warn!("Service: Job not found with id: {}", id);
                Err(ServiceError::NotFound(id))
            }
        }
    }

    pub async fn get_all_jobs(&self) -> Result<Vec<JobRow>, ServiceError> {
        let jobs = self.store.find_all().await.map_err(|e| {
            error!("Service: Error fetching all jobs: {}", e);
            ServiceError::Database(e)
        })?;

        info!("Service: Fetched {} jobs", jobs.len());
        Ok(jobs)
    }

    /// Overwrite every mutable field of an existing job
    pub async fn update_job(&self, id: i64, job: &JobPayload) -> Result<JobRow, ServiceError> {
        validate(job)?;

        let updated = self.store.update(id, job).await.map_err(|e| {
            error!("Service: Error updating job {}: {}", id, e);
            ServiceError::Database(e)
        })?;

        match updated {
            Some(row) => {
                info!("Service: Job updated successfully: {}", id);
                Ok(row)
            }
            None => {
                warn!("Service: Job not found for update: {}", id);
                Err(ServiceError::NotFound(id))
            }
        }
    }

    /// Delete a job; a missing id, including one removed concurrently, is NotFound
    pub async fn delete_job_by_id(&self, id: i64) -> Result<(), ServiceError> {
        let db_err = |e: sqlx::Error| {
            error!("Service: Error deleting job {}: {}", id, e);
            ServiceError::Database(e)
        };

        if !self.store.exists_by_id(id).await.map_err(&db_err)? {
            warn!("Service: Job not found for deletion: {}", id);
            return Err(ServiceError::NotFound(id));
        }

        if !self.store.delete_by_id(id).await.map_err(&db_err)? {
            warn!("Service: Job {} was removed before deletion completed", id);
            return Err(ServiceError::NotFound(id));
        }

        info!("Service: Job deleted successfully: {}", id);
        Ok(())
    }

    /// Case-insensitive substring search over designation, company, description and keywords
    pub async fn search_jobs(&self, term: &str) -> Result<Vec<JobRow>, ServiceError> {
        let jobs = self.store.search_by_term(term).await.map_err(|e| {
            error!("Service: Error searching jobs with term {}: {}", term, e);
            ServiceError::Database(e)
        })?;

        info!("Service: Found {} jobs for search term: {}", jobs.len(), term);
        Ok(jobs)
    }

    /// Filter all jobs in memory, keeping store order
    pub async fn advanced_filter(&self, filter: &JobFilter) -> Result<Vec<JobRow>, ServiceError> {
        let jobs = self.store.find_all().await.map_err(|e| {
            error!("Service: Error in advanced filter {:?}: {}", filter, e);
            ServiceError::Database(e)
        })?;

        let filtered: Vec<JobRow> = jobs.into_iter().filter(|job| filter.matches(job)).collect();

        info!("Service: Advanced filter returned {} jobs", filtered.len());
        Ok(filtered)
    }

    /// Look up the job and email the applicant
    ///
    /// No email is sent when the job does not exist. An address the transport
    /// cannot use is a `ServiceError::Validation`; any other delivery failure
    /// is returned as `ServiceError::Notification`.
    pub async fn apply_for_job(&self, job_id: i64, applicant_email: &str) -> Result<(), ServiceError> {
        let job = self.get_job_by_id(job_id).await?;

        let email = ApplicationReceived {
            designation: &job.designation,
            company_name: &job.company_name,
        }
        .to_email(applicant_email, &self.attachments);

        self.notifier.send(&email).await.map_err(|e| match e {
            NotifyError::Address(_) => {
                warn!("Service: Rejected applicant address {} for job {}: {}", applicant_email, job_id, e);
                ServiceError::Validation(e.to_string())
            }
            e => {
                error!(
                    "Service: Error sending application email to {} for job {}: {}",
                    applicant_email, job_id, e
                );
                ServiceError::Notification(e)
            }
        })?;

        info!("Service: Job application successful for job {} by applicant {}", job_id, applicant_email);
        Ok(())
    }

    /// Check that the job store is reachable
    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.store.ping().await.map_err(ServiceError::Database)
    }
}

fn validate(job: &JobPayload) -> Result<(), ServiceError> {
    job.validate().map_err(|e| {
        warn!("Service: Validation failed for job {}: {}", job.designation, e);
        ServiceError::Validation(e.to_string())
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::memory::InMemoryJobStore;
    use crate::notify::EmailAttachment;
    use crate::notify::recording::RecordingNotifier;

    pub(crate) fn test_attachments() -> Attachments {
        Attachments {
            signature_image: EmailAttachment {
                filename: "emailSignature.png".to_string(),
                content_type: "image/png",
                content: vec![0x89, b'P', b'N', b'G'],
            },
            interview_details: EmailAttachment {
                filename: "interviewDetails.pdf".to_string(),
                content_type: "application/pdf",
                content: b"%PDF-1.4".to_vec(),
            },
        }
    }

    pub(crate) fn payload(designation: &str, company: &str, experience: i32, salary: i64) -> JobPayload {
        JobPayload {
            designation: designation.to_string(),
            description: format!("{} role", designation),
            keywords: "rust,actix".to_string(),
            company_name: company.to_string(),
            work_experience: experience,
            salary,
        }
    }

    fn backend_engineer() -> JobPayload {
        JobPayload {
            designation: "Backend Engineer".to_string(),
            description: "Design and operate APIs".to_string(),
            keywords: "java,spring".to_string(),
            company_name: "Acme".to_string(),
            work_experience: 3,
            salary: 1_800_000,
        }
    }

    fn setup() -> (JobService, Arc<InMemoryJobStore>, Arc<RecordingNotifier>) {
        let store = Arc::new(InMemoryJobStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let service = JobService::new(store.clone(), notifier.clone(), test_attachments());
        (service, store, notifier)
    }

    fn ids(jobs: &[JobRow]) -> Vec<i64> {
        jobs.iter().map(|j| j.id).collect()
    }

    #[tokio::test]
    async fn get_by_id_returns_the_matching_job() {
        let (service, _, _) = setup();
        let a = service.add_job(&payload("Data Analyst", "Globex", 1, 900_000)).await.unwrap();
        let b = service.add_job(&payload("SRE", "Initech", 5, 2_500_000)).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(service.get_job_by_id(a.id).await.unwrap(), a);
        assert_eq!(service.get_job_by_id(b.id).await.unwrap(), b);
    }

    #[tokio::test]
    async fn empty_filter_returns_all_jobs() {
        let (service, _, _) = setup();
        service.add_job(&payload("Data Analyst", "Globex", 1, 900_000)).await.unwrap();
        service.add_job(&payload("SRE", "Initech", 5, 2_500_000)).await.unwrap();

        let all = service.get_all_jobs().await.unwrap();
        let filtered = service.advanced_filter(&JobFilter::default()).await.unwrap();
        assert_eq!(filtered, all);
        assert_eq!(filtered.len(), 2);
    }

    #[tokio::test]
    async fn equal_salary_bounds_select_exact_salary() {
        let (service, _, _) = setup();
        service.add_job(&payload("A", "X", 1, 1_000_000)).await.unwrap();
        let exact = service.add_job(&payload("B", "Y", 2, 1_200_000)).await.unwrap();
        service.add_job(&payload("C", "Z", 3, 1_400_000)).await.unwrap();

        let filter = JobFilter {
            min_salary: Some(1_200_000),
            max_salary: Some(1_200_000),
            ..Default::default()
        };
        let jobs = service.advanced_filter(&filter).await.unwrap();
        assert_eq!(ids(&jobs), vec![exact.id]);
    }

    #[tokio::test]
    async fn keyword_filter_matches_any_text_field() {
        let (service, _, _) = setup();
        let by_title = service.add_job(&payload("Rustacean", "Globex", 1, 1)).await.unwrap();
        let by_company = service.add_job(&payload("Dev", "RUST Corp", 1, 1)).await.unwrap();
        service.add_job(&JobPayload {
            keywords: "go,k8s".to_string(),
            ..payload("Dev", "Initech", 1, 1)
        })
        .await
        .unwrap();

        let filter = JobFilter {
            keyword: Some("rust".to_string()),
            ..Default::default()
        };
        let jobs = service.advanced_filter(&filter).await.unwrap();
        assert!(ids(&jobs).contains(&by_title.id));
        assert!(ids(&jobs).contains(&by_company.id));
        assert_eq!(jobs.len(), 2);
    }

    #[tokio::test]
    async fn delete_then_get_and_delete_again_are_not_found() {
        let (service, _, _) = setup();
        let job = service.add_job(&backend_engineer()).await.unwrap();

        service.delete_job_by_id(job.id).await.unwrap();
        assert!(matches!(service.get_job_by_id(job.id).await, Err(ServiceError::NotFound(id)) if id == job.id));
        assert!(matches!(service.delete_job_by_id(job.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_overwrites_all_fields() {
        let (service, _, _) = setup();
        let job = service.add_job(&backend_engineer()).await.unwrap();

        let replacement = payload("Staff Engineer", "Umbrella", 8, 3_000_000);
        let updated = service.update_job(job.id, &replacement).await.unwrap();

        assert_eq!(updated.id, job.id);
        assert_eq!(updated.designation, "Staff Engineer");
        assert_eq!(updated.description, "Staff Engineer role");
        assert_eq!(updated.keywords, "rust,actix");
        assert_eq!(updated.company_name, "Umbrella");
        assert_eq!(updated.work_experience, 8);
        assert_eq!(updated.salary, 3_000_000);
        assert_eq!(service.get_job_by_id(job.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_of_missing_job_is_not_found() {
        let (service, _, _) = setup();
        let result = service.update_job(99, &backend_engineer()).await;
        assert!(matches!(result, Err(ServiceError::NotFound(99))));
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected_before_storage() {
        let (service, store, _) = setup();
        let result = service.add_job(&payload("", "Acme", -1, 10)).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn apply_to_missing_job_sends_nothing() {
        let (service, _, notifier) = setup();
        let result = service.apply_for_job(7, "jane@example.com").await;
        assert!(matches!(result, Err(ServiceError::NotFound(7))));
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn apply_sends_exactly_one_email() {
        let (service, _, notifier) = setup();
        let job = service.add_job(&backend_engineer()).await.unwrap();

        service.apply_for_job(job.id, "jane@example.com").await.unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "jane@example.com");
        assert!(sent[0].subject.contains("Backend Engineer"));
        assert!(sent[0].body.contains("position at Acme"));
        assert_eq!(sent[0].attachments.len(), 2);
    }

    #[tokio::test]
    async fn apply_propagates_notification_failure() {
        let (service, _, notifier) = setup();
        let job = service.add_job(&backend_engineer()).await.unwrap();
        notifier.set_failing(true);

        let result = service.apply_for_job(job.id, "jane@example.com").await;
        assert!(matches!(result, Err(ServiceError::Notification(_))));
    }

    #[tokio::test]
    async fn undeliverable_address_is_a_validation_error() {
        let (service, _, notifier) = setup();
        let job = service.add_job(&backend_engineer()).await.unwrap();

        let result = service.apply_for_job(job.id, "not an address").await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_database_error() {
        let (service, store, _) = setup();
        store.set_unavailable(true);

        assert!(matches!(service.get_all_jobs().await, Err(ServiceError::Database(_))));
        assert!(matches!(service.search_jobs("x").await, Err(ServiceError::Database(_))));
        assert!(service.ping().await.is_err());
    }

    #[tokio::test]
    async fn backend_engineer_scenario() {
        let (service, _, _) = setup();
        let job = service.add_job(&backend_engineer()).await.unwrap();

        let found = service.search_jobs("Acme").await.unwrap();
        assert_eq!(ids(&found), vec![job.id]);

        let senior = JobFilter {
            min_experience: Some(4),
            ..Default::default()
        };
        assert!(service.advanced_filter(&senior).await.unwrap().is_empty());

        let engineers = JobFilter {
            keyword: Some("Engineer".to_string()),
            min_salary: Some(1_500_000),
            max_salary: Some(2_000_000),
            ..Default::default()
        };
        assert_eq!(ids(&service.advanced_filter(&engineers).await.unwrap()), vec![job.id]);
    }
}
