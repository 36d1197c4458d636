use crate::error::FetchError;
use crate::models::job::{Job, JobStatus};
use async_trait::async_trait;
use std::path::PathBuf;

/// Backend the job records are fetched from
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_job(&self, id: &str) -> Result<Job, FetchError>;

    async fn list_jobs(&self, status: Option<JobStatus>) -> Result<Vec<Job>, FetchError>;
}

/// Job source backed by a JSON array on disk.
///
/// The file is re-read on every fetch, so each call is a full round-trip.
pub struct FileJobSource {
    path: PathBuf,
}

impl FileJobSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> Result<Vec<Job>, FetchError> {
        log::debug!("Reading jobs from {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}

#[async_trait]
impl JobSource for FileJobSource {
    async fn fetch_job(&self, id: &str) -> Result<Job, FetchError> {
        self.read_all()
            .await?
            .into_iter()
            .find(|job| job.id == id)
            .ok_or_else(|| FetchError::NotFound(id.to_string()))
    }

    async fn list_jobs(&self, status: Option<JobStatus>) -> Result<Vec<Job>, FetchError> {
        let mut jobs = self.read_all().await?;
        if let Some(status) = status {
            jobs.retain(|job| job.status == status);
        }
        Ok(jobs)
    }
}
