//! Host runtime integration
//!
//! A host keeps capabilities in a registry keyed by a service type tag and
//! hands out trait objects. [`Service`] covers identification and the
//! initialize-once lifecycle; [`MbdService`] is the capability surface the
//! host calls after lookup.

use crate::client::MbdClient;
use crate::config::SettingsSource;
use crate::error::ApiResult;
use crate::format;
use crate::options::Options;
use crate::types::{
    CastFeedResponse, EventType, LabelCategory, LabelsResponse, SemanticSearchResponse,
    TextLabelsResponse, UserFeedResponse, UserSearchResponse,
};
use async_trait::async_trait;

/// Tag the mbd capability is registered under
pub const SERVICE_TYPE: &str = "text_generation";

/// Lifecycle contract for services registered with a host runtime
pub trait Service: Send + Sync {
    /// Registry tag for this service
    fn service_type(&self) -> &'static str;

    /// Resolve settings and (re)build all connection state
    ///
    /// Must be called before any operation; calling it again replaces the
    /// previous configuration entirely.
    fn initialize(&mut self, settings: &dyn SettingsSource) -> ApiResult<()>;
}

/// The mbd Farcaster capability
#[async_trait]
pub trait MbdService: Service {
    /// Personalized cast feed for a user
    async fn get_for_you_feed(&self, user_id: &str, options: Options) -> ApiResult<CastFeedResponse>;
    /// Trending casts
    async fn get_trending_feed(&self, options: Options) -> ApiResult<CastFeedResponse>;
    /// Popular casts
    async fn get_popular_feed(&self, options: Options) -> ApiResult<CastFeedResponse>;
    /// Semantic cast search
    async fn semantic_search(&self, query: &str, options: Options) -> ApiResult<SemanticSearchResponse>;
    /// Labels for cast identifiers
    async fn get_labels_for_items(
        &self,
        items: &[String],
        category: LabelCategory,
    ) -> ApiResult<LabelsResponse>;
    /// Labels for free text
    async fn get_labels_for_text(
        &self,
        texts: &[String],
        category: LabelCategory,
    ) -> ApiResult<TextLabelsResponse>;
    /// Casts ranked by a label
    async fn get_top_items_by_label(&self, label: &str, options: Options) -> ApiResult<CastFeedResponse>;
    /// Users similar to a user
    async fn get_similar_users(&self, user_id: &str, options: Options) -> ApiResult<UserFeedResponse>;
    /// Semantic user search
    async fn search_users(&self, query: &str, options: Options) -> ApiResult<UserSearchResponse>;
    /// Users engaging with a channel
    async fn get_users_for_channel(
        &self,
        channel: &str,
        event_type: EventType,
        options: Options,
    ) -> ApiResult<UserFeedResponse>;
    /// Users engaging with a cast
    async fn get_users_for_item(
        &self,
        item_id: &str,
        event_type: EventType,
        options: Options,
    ) -> ApiResult<UserFeedResponse>;
    /// Users engaging with a topic
    async fn get_users_for_topic(
        &self,
        topic: &str,
        event_type: EventType,
        options: Options,
    ) -> ApiResult<UserFeedResponse>;

    /// Render a cast response as text
    fn format_casts_response(&self, response: &CastFeedResponse) -> String {
        format::format_casts(response)
    }

    /// Render a user response as text
    fn format_users_response(&self, response: &UserFeedResponse) -> String {
        format::format_users(response)
    }

    /// Render a labels response as text
    fn format_labels_response(&self, response: &LabelsResponse) -> String {
        format::format_labels(response)
    }
}

impl Service for MbdClient {
    fn service_type(&self) -> &'static str {
        SERVICE_TYPE
    }

    fn initialize(&mut self, settings: &dyn SettingsSource) -> ApiResult<()> {
        MbdClient::initialize(self, settings)
    }
}

#[async_trait]
impl MbdService for MbdClient {
    async fn get_for_you_feed(&self, user_id: &str, options: Options) -> ApiResult<CastFeedResponse> {
        self.casts().for_you_feed(user_id, options).await
    }

    async fn get_trending_feed(&self, options: Options) -> ApiResult<CastFeedResponse> {
        self.casts().trending_feed(options).await
    }

    async fn get_popular_feed(&self, options: Options) -> ApiResult<CastFeedResponse> {
        self.casts().popular_feed(options).await
    }

    async fn semantic_search(&self, query: &str, options: Options) -> ApiResult<SemanticSearchResponse> {
        self.casts().semantic_search(query, options).await
    }

    async fn get_labels_for_items(
        &self,
        items: &[String],
        category: LabelCategory,
    ) -> ApiResult<LabelsResponse> {
        self.labels().for_items(items, category).await
    }

    async fn get_labels_for_text(
        &self,
        texts: &[String],
        category: LabelCategory,
    ) -> ApiResult<TextLabelsResponse> {
        self.labels().for_text(texts, category).await
    }

    async fn get_top_items_by_label(&self, label: &str, options: Options) -> ApiResult<CastFeedResponse> {
        self.labels().top_items(label, options).await
    }

    async fn get_similar_users(&self, user_id: &str, options: Options) -> ApiResult<UserFeedResponse> {
        self.users().similar(user_id, options).await
    }

    async fn search_users(&self, query: &str, options: Options) -> ApiResult<UserSearchResponse> {
        self.users().search(query, options).await
    }

    async fn get_users_for_channel(
        &self,
        channel: &str,
        event_type: EventType,
        options: Options,
    ) -> ApiResult<UserFeedResponse> {
        self.users().for_channel(channel, event_type, options).await
    }

    async fn get_users_for_item(
        &self,
        item_id: &str,
        event_type: EventType,
        options: Options,
    ) -> ApiResult<UserFeedResponse> {
        self.users().for_item(item_id, event_type, options).await
    }

    async fn get_users_for_topic(
        &self,
        topic: &str,
        event_type: EventType,
        options: Options,
    ) -> ApiResult<UserFeedResponse> {
        self.users().for_topic(topic, event_type, options).await
    }
}
