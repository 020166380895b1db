use std::sync::Arc;

use crate::ports::feeds::OddsFeed;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiStatus {
    pub odds_configured: bool,
    pub odds_requests_remaining: Option<u32>,
}

#[async_trait::async_trait]
pub trait ApiStatusUseCase {
    async fn api_status(&self) -> ApiStatus;
}

pub struct ApiStatusUseCaseImpl<F: OddsFeed> {
    odds_feed: Arc<F>,
}

impl<F: OddsFeed> ApiStatusUseCaseImpl<F> {
    pub fn new(odds_feed: Arc<F>) -> Self {
        Self { odds_feed }
    }
}

#[async_trait::async_trait]
impl<F: OddsFeed + Send + Sync + 'static> ApiStatusUseCase for ApiStatusUseCaseImpl<F> {
    async fn api_status(&self) -> ApiStatus {
        if !self.odds_feed.is_configured() {
            return ApiStatus {
                odds_configured: false,
                odds_requests_remaining: None,
            };
        }
        ApiStatus {
            odds_configured: true,
            odds_requests_remaining: self.odds_feed.remaining_requests().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeOddsFeed;

    #[tokio::test]
    async fn test_reports_remaining_quota() {
        let use_case = ApiStatusUseCaseImpl::new(Arc::new(FakeOddsFeed::with(Vec::new())));
        assert_eq!(
            use_case.api_status().await,
            ApiStatus {
                odds_configured: true,
                odds_requests_remaining: Some(480),
            }
        );
    }
}
