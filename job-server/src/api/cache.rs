use request_cache::CacheStats;
use rocket::serde::json::Json;
use rocket::{delete, get, State};
use serde::{Deserialize, Serialize};

use crate::models::context::ContextPointer;

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheStatsResponse {
    pub cache_enabled: bool,
    pub jobs: CacheStats,
    pub job_lists: CacheStats,
}

/// Get current cache statistics
#[get("/cache/stats")]
pub fn cache_stats(ctx: &State<ContextPointer>) -> Json<CacheStatsResponse> {
    let client = ctx.client();

    Json(CacheStatsResponse {
        cache_enabled: ctx.config().cache.enabled,
        jobs: client.job_cache_stats(),
        job_lists: client.job_list_cache_stats(),
    })
}

/// Clear the cache (useful for debugging/admin)
#[delete("/cache")]
pub fn clear_cache(ctx: &State<ContextPointer>) -> Json<bool> {
    ctx.client().clear_cache();
    Json(true)
}
