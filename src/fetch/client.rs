use async_trait::async_trait;
use reqwest::{Request, Response};

/// Seam for HTTP execution so the loader can be exercised without touching
/// the real open-data endpoint.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
