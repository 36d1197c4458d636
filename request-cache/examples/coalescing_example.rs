use chrono::Duration;
use request_cache::{CacheConfig, CacheKey, Computation, RequestCache};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let cache: Arc<RequestCache<Computation<String>>> =
        Arc::new(RequestCache::new(CacheConfig::with_ttl(Duration::seconds(2))));
    let fetches = Arc::new(AtomicUsize::new(0));
    let key: CacheKey = "job:42".parse()?;

    // Several components mounting at once all ask for the same job
    let mut handles = vec![];
    for component in 0..4 {
        let cache = cache.clone();
        let fetches = fetches.clone();
        let key = key.clone();

        handles.push(tokio::spawn(async move {
            let job = cache
                .coalesce(key, || async move {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(std::time::Duration::from_millis(250)).await;
                    "Replace water heater".to_string()
                })
                .await;
            println!("component {} got: {}", component, job);
        }));
    }
    for handle in handles {
        handle.await?;
    }
    println!("fetches issued: {}", fetches.load(Ordering::SeqCst));
    println!("cache stats: {:?}", cache.stats());

    // Once the TTL has passed the entry is gone and the next request fetches again
    tokio::time::sleep(std::time::Duration::from_millis(2_100)).await;
    println!("still cached after TTL: {}", cache.has(&key));

    Ok(())
}
