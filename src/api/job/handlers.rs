use actix_web::{
    HttpResponse, delete, get, post, put,
    web::{Data, Path, Query, ServiceConfig, scope},
};
use actix_web_validator::{Json, Query as ValidatedQuery};

use crate::api::error::ServiceError;
use super::dto::{JobResponse, MessageResponse};
use super::models::{ApplyParams, JobFilter, JobPayload};
use super::service::JobService;

#[get("/search/{term}")]
async fn search_jobs(
    service: Data<JobService>,
    term: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let jobs = service.search_jobs(&term).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[get("")]
async fn get_all_jobs(service: Data<JobService>) -> Result<HttpResponse, ServiceError> {
    let jobs = service.get_all_jobs().await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[get("/filter")]
async fn advanced_filter(
    service: Data<JobService>,
    filter: Query<JobFilter>,
) -> Result<HttpResponse, ServiceError> {
    let jobs = service.advanced_filter(&filter).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[get("/{id}")]
async fn get_job(
    service: Data<JobService>,
    id: Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.get_job_by_id(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(job))
}

#[post("")]
async fn add_job(
    service: Data<JobService>,
    job: Json<JobPayload>,
) -> Result<HttpResponse, ServiceError> {
    let job_row = service.add_job(&job).await?;
    Ok(HttpResponse::Ok().json(JobResponse {
        message: "Job added successfully!".to_string(),
        job: job_row,
    }))
}

#[put("/{id}")]
async fn update_job(
    service: Data<JobService>,
    id: Path<i64>,
    job: Json<JobPayload>,
) -> Result<HttpResponse, ServiceError> {
    service.update_job(id.into_inner(), &job).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Job updated successfully!")))
}

#[delete("/{id}")]
async fn delete_job(
    service: Data<JobService>,
    id: Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    service.delete_job_by_id(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Job deleted successfully!")))
}

#[post("/{id}/apply")]
async fn apply_for_job(
    service: Data<JobService>,
    id: Path<i64>,
    params: ValidatedQuery<ApplyParams>,
) -> Result<HttpResponse, ServiceError> {
    let params = params.into_inner();
    service
        .apply_for_job(id.into_inner(), &params.applicant_email)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Application submitted successfully!")))
}

/// Routes under `/jobs`; the literal segments are registered ahead of `/{id}`
pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("jobs")
            .service(search_jobs)
            .service(advanced_filter)
            .service(get_all_jobs)
            .service(add_job)
            .service(get_job)
            .service(update_job)
            .service(delete_job)
            .service(apply_for_job),
    );
}
