//! User feed and search endpoints

use crate::client::MbdClient;
use crate::error::ApiResult;
use crate::options::{merge_options, Options};
use crate::types::{EventType, UserFeedResponse, UserSearchResponse};
use serde_json::json;

pub(crate) const SIMILAR: &str = "/users/feed/similar";
pub(crate) const SEARCH: &str = "/users/search/semantic";
pub(crate) const FOR_CHANNEL: &str = "/users/feed/for-channel";
pub(crate) const FOR_ITEM: &str = "/users/feed/for-item";
pub(crate) const FOR_TOPIC: &str = "/users/feed/for-topic";

/// Similar users, user search, and users engaging with a channel, cast or topic
#[derive(Clone)]
pub struct UsersApi {
    client: MbdClient,
}

impl UsersApi {
    /// Create a new users API interface
    pub(crate) fn new(client: MbdClient) -> Self {
        Self { client }
    }

    /// Users similar to the given user
    ///
    /// POST /users/feed/similar
    pub async fn similar(&self, user_id: &str, options: Options) -> ApiResult<UserFeedResponse> {
        let body = merge_options(options, [("user_id", json!(user_id))]);
        self.client.post(SIMILAR, &body).await
    }

    /// Semantic search over user profiles
    ///
    /// POST /users/search/semantic
    pub async fn search(&self, query: &str, options: Options) -> ApiResult<UserSearchResponse> {
        let body = merge_options(options, [("query", json!(query))]);
        self.client.post(SEARCH, &body).await
    }

    /// Users engaging with a channel
    ///
    /// POST /users/feed/for-channel
    pub async fn for_channel(
        &self,
        channel: &str,
        event_type: EventType,
        options: Options,
    ) -> ApiResult<UserFeedResponse> {
        let body = merge_options(
            options,
            [("channel", json!(channel)), ("event_type", json!(event_type))],
        );
        self.client.post(FOR_CHANNEL, &body).await
    }

    /// Users engaging with a cast
    ///
    /// POST /users/feed/for-item
    pub async fn for_item(
        &self,
        item_id: &str,
        event_type: EventType,
        options: Options,
    ) -> ApiResult<UserFeedResponse> {
        let body = merge_options(
            options,
            [("item_id", json!(item_id)), ("event_type", json!(event_type))],
        );
        self.client.post(FOR_ITEM, &body).await
    }

    /// Users engaging with a topic
    ///
    /// POST /users/feed/for-topic
    pub async fn for_topic(
        &self,
        topic: &str,
        event_type: EventType,
        options: Options,
    ) -> ApiResult<UserFeedResponse> {
        let body = merge_options(
            options,
            [("topic", json!(topic)), ("event_type", json!(event_type))],
        );
        self.client.post(FOR_TOPIC, &body).await
    }
}
