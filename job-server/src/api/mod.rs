use rocket::{routes, Build, Rocket};

use crate::models::context::ContextPointer;

pub mod cache;
pub mod jobs;

pub fn build(context: ContextPointer, config: rocket::Config) -> Rocket<Build> {
    rocket::custom(config).manage(context).mount(
        "/",
        routes![jobs::job, jobs::jobs, cache::cache_stats, cache::clear_cache],
    )
}
