use crate::error::FetchError;
use crate::models::job::{Job, JobStatus};
use crate::source::JobSource;
use request_cache::{CacheConfig, CacheKey, CacheStats, Computation, RequestCache, SharedRequestCache};
use std::sync::Arc;

pub type JobResult = Result<Arc<Job>, Arc<FetchError>>;
pub type JobListResult = Result<Arc<Vec<Job>>, Arc<FetchError>>;

/// Fetches job data through the request cache.
///
/// Concurrent requests for the same job or the same list query share one
/// fetch, and the outcome (success or failure) is reused until the TTL runs
/// out.
#[derive(Clone)]
pub struct JobDataClient {
    source: Arc<dyn JobSource>,
    jobs: SharedRequestCache<Computation<JobResult>>,
    job_lists: SharedRequestCache<Computation<JobListResult>>,
}

impl JobDataClient {
    pub fn new(source: Arc<dyn JobSource>, cache_config: CacheConfig) -> Self {
        Self {
            source,
            jobs: Arc::new(RequestCache::new(cache_config.clone())),
            job_lists: Arc::new(RequestCache::new(cache_config)),
        }
    }

    pub async fn job(&self, id: &str) -> JobResult {
        let source = self.source.clone();
        let id = id.to_string();

        self.jobs
            .coalesce(CacheKey::new("job", id.as_str()), move || async move {
                log::debug!("Fetching job {}", id);
                source.fetch_job(&id).await.map(Arc::new).map_err(Arc::new)
            })
            .await
    }

    pub async fn jobs(&self, status: Option<JobStatus>) -> JobListResult {
        let source = self.source.clone();
        let params = status.map(|status| ("status", status.to_string()));

        self.job_lists
            .coalesce(CacheKey::from_query("jobs", params), move || async move {
                log::debug!("Fetching job list (status: {:?})", status);
                source.list_jobs(status).await.map(Arc::new).map_err(Arc::new)
            })
            .await
    }

    pub fn job_cache_stats(&self) -> CacheStats {
        self.jobs.stats()
    }

    pub fn job_list_cache_stats(&self) -> CacheStats {
        self.job_lists.stats()
    }

    pub fn clear_cache(&self) {
        self.jobs.clear();
        self.job_lists.clear();
    }
}
