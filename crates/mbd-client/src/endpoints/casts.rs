//! Cast feed and search endpoints

use crate::client::MbdClient;
use crate::error::ApiResult;
use crate::options::{merge_options, Options};
use crate::types::{CastFeedResponse, SemanticSearchResponse};
use serde_json::json;

pub(crate) const FOR_YOU: &str = "/casts/feed/for-you";
pub(crate) const TRENDING: &str = "/casts/feed/trending";
pub(crate) const POPULAR: &str = "/casts/feed/popular";
pub(crate) const SEMANTIC_SEARCH: &str = "/casts/search/semantic";

/// Cast feeds and semantic cast search
#[derive(Clone)]
pub struct CastsApi {
    client: MbdClient,
}

impl CastsApi {
    /// Create a new casts API interface
    pub(crate) fn new(client: MbdClient) -> Self {
        Self { client }
    }

    /// Personalized recommendations for a user
    ///
    /// POST /casts/feed/for-you
    pub async fn for_you_feed(&self, user_id: &str, options: Options) -> ApiResult<CastFeedResponse> {
        let body = merge_options(options, [("user_id", json!(user_id))]);
        self.client.post(FOR_YOU, &body).await
    }

    /// Trending casts; options are sent as the whole body
    ///
    /// POST /casts/feed/trending
    pub async fn trending_feed(&self, options: Options) -> ApiResult<CastFeedResponse> {
        self.client.post(TRENDING, &options).await
    }

    /// Popular casts; options are sent as the whole body
    ///
    /// POST /casts/feed/popular
    pub async fn popular_feed(&self, options: Options) -> ApiResult<CastFeedResponse> {
        self.client.post(POPULAR, &options).await
    }

    /// Semantic search over casts
    ///
    /// POST /casts/search/semantic
    pub async fn semantic_search(
        &self,
        query: &str,
        options: Options,
    ) -> ApiResult<SemanticSearchResponse> {
        let body = merge_options(options, [("query", json!(query))]);
        self.client.post(SEMANTIC_SEARCH, &body).await
    }
}
