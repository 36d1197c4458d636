use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, State};
use serde::Serialize;
use std::sync::Arc;

use crate::error::FetchError;
use crate::models::context::ContextPointer;
use crate::models::job::{Job, JobStatus};

type Failure = (Status, String);

#[derive(Serialize)]
pub struct JobResponse {
    #[serde(flatten)]
    pub job: Job,
    pub total_cents: i64,
}

impl TryFrom<&Job> for JobResponse {
    type Error = Failure;

    fn try_from(job: &Job) -> Result<Self, Self::Error> {
        let total_cents = job.total_cents().ok_or_else(|| {
            log::warn!("Total of job {} overflows", job.id);
            (
                Status::InternalServerError,
                format!("Total of job `{}` is out of range", job.id),
            )
        })?;

        Ok(Self {
            job: job.clone(),
            total_cents,
        })
    }
}

fn fetch_failure(error: Arc<FetchError>) -> Failure {
    let status = match *error {
        FetchError::NotFound(_) => Status::NotFound,
        FetchError::Io(_) | FetchError::Parse(_) => {
            log::warn!("Job fetch failed: {}", error);
            Status::InternalServerError
        }
    };
    (status, error.to_string())
}

/// Get a single job
#[get("/jobs/<id>")]
pub async fn job(id: &str, ctx: &State<ContextPointer>) -> Result<Json<JobResponse>, Failure> {
    let job = ctx.client().job(id).await.map_err(fetch_failure)?;
    Ok(Json(JobResponse::try_from(job.as_ref())?))
}

/// List jobs, optionally filtered by status
#[get("/jobs?<status>")]
pub async fn jobs(status: Option<&str>, ctx: &State<ContextPointer>) -> Result<Json<Vec<JobResponse>>, Failure> {
    let status = status
        .map(|status| status.parse::<JobStatus>())
        .transpose()
        .map_err(|_| (Status::BadRequest, "Unknown job status".to_string()))?;

    let jobs = ctx.client().jobs(status).await.map_err(fetch_failure)?;
    let jobs = jobs
        .iter()
        .map(JobResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(jobs))
}
