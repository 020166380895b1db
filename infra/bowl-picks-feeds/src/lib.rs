//! HTTP clients for the upstream schedule and betting-odds providers.

use std::time::Duration;

use bowl_picks_app::ports::feeds::FeedError;
use reqwest::Client;

pub mod ncaa;
pub mod odds;

pub use ncaa::NcaaScheduleFeed;
pub use odds::OddsApiFeed;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn http_client() -> Client {
    Client::builder()
        .user_agent("bowl-picks/0.1")
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_default()
}

async fn get_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
    source: &str,
) -> Result<T, FeedError> {
    let response = request
        .send()
        .await
        .map_err(|e| FeedError::Unavailable(format!("{}: {}", source, e.without_url())))?
        .error_for_status()
        .map_err(|e| FeedError::Unavailable(format!("{}: {}", source, e.without_url())))?;
    response
        .json::<T>()
        .await
        .map_err(|e| FeedError::Malformed(format!("{}: {}", source, e.without_url())))
}
