//! Data model for mbd API requests and responses
//!
//! Every response is wrapped in a [`MbdResponse`] envelope. The `success`
//! flag is the authoritative signal; a present `data` field alone does not
//! mean the call succeeded.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Label name to score, in the order the service returned them
pub type LabelScores = IndexMap<String, f64>;

/// Item identifier (or text input index) to its label scores
pub type LabelMap = IndexMap<String, LabelScores>;

// ============================================================================
// Envelope
// ============================================================================

/// Response envelope shared by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MbdResponse<T> {
    /// Whether the service considers the call successful
    #[serde(default)]
    pub success: bool,
    /// Optional human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Endpoint-specific payload
    #[serde(default)]
    pub data: Option<T>,
    /// Pagination metadata for feed endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of results
    #[serde(default)]
    pub total: u64,
    /// Results per page
    #[serde(default)]
    pub page_size: u64,
    /// Current page (1-based)
    #[serde(default)]
    pub page_number: u64,
}

/// Cast feeds: for-you, trending, popular, top items by label
pub type CastFeedResponse = MbdResponse<Vec<Cast>>;
/// Semantic cast search
pub type SemanticSearchResponse = MbdResponse<Vec<Cast>>;
/// User feeds: similar users, users for channel/item/topic
pub type UserFeedResponse = MbdResponse<Vec<UserProfile>>;
/// Semantic user search
pub type UserSearchResponse = MbdResponse<Vec<UserProfile>>;
/// Labels keyed by item identifier
pub type LabelsResponse = MbdResponse<LabelMap>;
/// Labels keyed by text input index
pub type TextLabelsResponse = MbdResponse<LabelMap>;

// ============================================================================
// Casts
// ============================================================================

/// A single cast
///
/// Decoding is lenient: a null `text` or `timestamp` falls back to the empty
/// value, and counters accept any JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cast {
    /// Cast hash
    #[serde(deserialize_with = "string_or_number")]
    pub item_id: String,
    /// Cast body
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Who published it
    pub author: CastAuthor,
    /// Epoch milliseconds
    #[serde(default, deserialize_with = "lenient_millis")]
    pub timestamp: i64,
    /// Attached media and links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Value>>,
    /// Reply count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies_count: Option<f64>,
    /// Recast count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recasts_count: Option<f64>,
    /// Total reactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions_count: Option<f64>,
    /// Like count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes_count: Option<f64>,
    /// Root of the thread this cast belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_hash: Option<String>,
    /// Hash of the cast being replied to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_hash: Option<String>,
    /// Channel URL for top-level channel casts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_url: Option<String>,
    /// Author of the parent cast
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_author: Option<ParentAuthor>,
    /// Profiles mentioned in the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentioned_profiles: Option<Vec<Value>>,
    /// Channel, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    /// Labels attached by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_labels: Option<LabelScores>,
    /// Opaque extra data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Author of a cast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastAuthor {
    /// Farcaster id
    #[serde(deserialize_with = "string_or_number")]
    pub fid: String,
    /// Handle, without the leading `@`
    pub username: String,
    /// Display name; the username is shown when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Profile picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Verified badge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

/// Author of the cast being replied to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentAuthor {
    /// Farcaster id
    #[serde(deserialize_with = "string_or_number")]
    pub fid: String,
    /// Handle
    pub username: String,
}

/// Channel a cast was published in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel name
    pub name: String,
    /// Channel URL
    #[serde(default)]
    pub url: String,
}

// ============================================================================
// Users
// ============================================================================

/// A Farcaster user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Farcaster id
    #[serde(deserialize_with = "string_or_number")]
    pub fid: String,
    /// Handle
    pub username: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Profile picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Verified badge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Follower count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers_count: Option<f64>,
    /// Following count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_count: Option<f64>,
    /// Profile bio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Link to the profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    /// Relevance score for the query that produced this user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Labels attached by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_labels: Option<LabelScores>,
}

/// Identifiers arrive as strings from some endpoints and numbers from others
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Epoch milliseconds from an integer, a float or null
#[allow(clippy::cast_possible_truncation)]
fn lenient_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => Ok(n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or_default()),
        other => Err(serde::de::Error::custom(format!(
            "expected a timestamp, got {other}"
        ))),
    }
}

// ============================================================================
// Request enums
// ============================================================================

/// Label taxonomy applied by the labeler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelCategory {
    /// Subject matter
    Topics,
    /// Positive, neutral, negative
    Sentiment,
    /// Emotional tone
    Emotion,
    /// Spam, harassment and similar
    Moderation,
    /// Every category at once
    All,
}

impl LabelCategory {
    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Topics => "topics",
            Self::Sentiment => "sentiment",
            Self::Emotion => "emotion",
            Self::Moderation => "moderation",
            Self::All => "all",
        }
    }
}

impl fmt::Display for LabelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "topics" => Ok(Self::Topics),
            "sentiment" => Ok(Self::Sentiment),
            "emotion" => Ok(Self::Emotion),
            "moderation" => Ok(Self::Moderation),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown label category '{other}' (expected topics, sentiment, emotion, moderation or all)"
            )),
        }
    }
}

/// Engagement signal used to filter "users for X" queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Liked
    Like,
    /// Recast
    Share,
    /// Replied
    Comment,
    /// Any of the above
    All,
}

impl EventType {
    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Share => "share",
            Self::Comment => "comment",
            Self::All => "all",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "like" => Ok(Self::Like),
            "share" => Ok(Self::Share),
            "comment" => Ok(Self::Comment),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown event type '{other}' (expected like, share, comment or all)"
            )),
        }
    }
}

/// Scoring window for feed ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringType {
    /// All-time engagement
    #[serde(rename = "all")]
    All,
    /// Engagement over the last day
    #[serde(rename = "1day")]
    OneDay,
}

// ============================================================================
// Feed filters
// ============================================================================

/// What a promotion filter injects into a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionType {
    /// Mix in another feed
    Feed,
    /// Pin specific items
    Items,
}

/// Promote another feed or a fixed set of items into the results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionFilter {
    /// What gets promoted
    pub promotion_type: PromotionType,
    /// Feed to mix in, for [`PromotionType::Feed`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_id: Option<String>,
    /// Share of results taken from the promoted feed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    /// Items to pin, for [`PromotionType::Items`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    /// Positions the pinned items go to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranks: Option<Vec<u32>>,
}

/// Feed filters; unknown keys are passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    /// Promotions applied on top of the ranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_filters: Option<Vec<PromotionFilter>>,
    /// Any other filter keys, sent as-is
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_deserialize_minimal() {
        let json = r#"{
            "item_id": "1",
            "text": "hello",
            "author": {"fid": "9", "username": "bob"},
            "timestamp": 1700000000000,
            "likes_count": 5
        }"#;

        let cast: Cast = serde_json::from_str(json).unwrap();
        assert_eq!(cast.item_id, "1");
        assert_eq!(cast.author.username, "bob");
        assert_eq!(cast.likes_count, Some(5.0));
        assert_eq!(cast.replies_count, None);
        assert!(cast.channel.is_none());
    }

    #[test]
    fn test_cast_with_nulls_and_float_counters() {
        let json = r#"{
            "item_id": 7,
            "text": null,
            "author": {"fid": 9, "username": "bob"},
            "timestamp": 1.7e12,
            "likes_count": 5.0,
            "replies_count": null
        }"#;

        let cast: Cast = serde_json::from_str(json).unwrap();
        assert_eq!(cast.text, "");
        assert_eq!(cast.timestamp, 1_700_000_000_000);
        assert_eq!(cast.likes_count, Some(5.0));
        assert_eq!(cast.replies_count, None);

        let cast: Cast = serde_json::from_str(
            r#"{"item_id": "1", "author": {"fid": "1", "username": "a"}, "timestamp": null}"#,
        )
        .unwrap();
        assert_eq!(cast.timestamp, 0);
        assert_eq!(cast.text, "");
    }

    #[test]
    fn test_numeric_fid_accepted() {
        let json = r#"{"fid": 3621, "username": "alice", "score": 0.87}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.fid, "3621");
        assert_eq!(user.score, Some(0.87));
    }

    #[test]
    fn test_envelope_without_data() {
        let response: CastFeedResponse =
            serde_json::from_str(r#"{"success": false, "message": "bad user"}"#).unwrap();
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("bad user"));
    }

    #[test]
    fn test_envelope_data_does_not_imply_success() {
        let response: CastFeedResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.data, Some(vec![]));
    }

    #[test]
    fn test_envelope_with_pagination() {
        let json = r#"{
            "success": true,
            "data": [],
            "pagination": {"total": 120, "page_size": 25, "page_number": 2}
        }"#;
        let response: UserFeedResponse = serde_json::from_str(json).unwrap();
        let page = response.pagination.unwrap();
        assert_eq!(page.total, 120);
        assert_eq!(page.page_size, 25);
        assert_eq!(page.page_number, 2);
    }

    #[test]
    fn test_label_map_keeps_key_order() {
        let json = r#"{"success": true, "data": {"b": {"z": 0.1, "a": 0.2}, "a": {"x": 1.0}}}"#;
        let response: LabelsResponse = serde_json::from_str(json).unwrap();
        let data = response.data.unwrap();
        let items: Vec<_> = data.keys().map(String::as_str).collect();
        assert_eq!(items, ["b", "a"]);
        let labels: Vec<_> = data["b"].keys().map(String::as_str).collect();
        assert_eq!(labels, ["z", "a"]);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(LabelCategory::Moderation).unwrap(), "moderation");
        assert_eq!(serde_json::to_value(EventType::Comment).unwrap(), "comment");
        assert_eq!(serde_json::to_value(ScoringType::OneDay).unwrap(), "1day");
        assert_eq!("Topics".parse::<LabelCategory>().unwrap(), LabelCategory::Topics);
        assert_eq!("share".parse::<EventType>().unwrap(), EventType::Share);
        assert!("retweet".parse::<EventType>().is_err());
    }

    #[test]
    fn test_filters_serialize_with_extra_keys() {
        let mut filters = Filters {
            promotion_filters: Some(vec![PromotionFilter {
                promotion_type: PromotionType::Items,
                feed_id: None,
                percent: None,
                items: Some(vec!["0xabc".to_string()]),
                ranks: Some(vec![1]),
            }]),
            ..Filters::default()
        };
        filters
            .extra
            .insert("channels".to_string(), serde_json::json!(["rust"]));

        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(value["promotion_filters"][0]["promotion_type"], "items");
        assert_eq!(value["promotion_filters"][0]["items"][0], "0xabc");
        assert!(value["promotion_filters"][0].get("feed_id").is_none());
        assert_eq!(value["channels"][0], "rust");
    }
}
