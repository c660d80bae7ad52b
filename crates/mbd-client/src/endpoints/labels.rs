//! AI labeling endpoints

use crate::client::MbdClient;
use crate::error::ApiResult;
use crate::options::{merge_options, Options};
use crate::types::{CastFeedResponse, LabelCategory, LabelsResponse, TextLabelsResponse};
use serde_json::json;

pub(crate) const FOR_ITEMS: &str = "/casts/labels/for-items";
pub(crate) const FOR_TEXT: &str = "/casts/labels/for-text";
pub(crate) const TOP_ITEMS: &str = "/casts/labels/top-items";

/// Labels for casts and free text, and casts ranked by label
#[derive(Clone)]
pub struct LabelsApi {
    client: MbdClient,
}

impl LabelsApi {
    /// Create a new labels API interface
    pub(crate) fn new(client: MbdClient) -> Self {
        Self { client }
    }

    /// Labels for a list of cast identifiers
    ///
    /// POST /casts/labels/for-items
    pub async fn for_items<S: AsRef<str>>(
        &self,
        items: &[S],
        category: LabelCategory,
    ) -> ApiResult<LabelsResponse> {
        let items: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
        let body = json!({
            "items_list": items,
            "label_category": category,
        });
        self.client.post(FOR_ITEMS, &body).await
    }

    /// Labels for arbitrary text inputs, keyed by input index
    ///
    /// POST /casts/labels/for-text
    pub async fn for_text<S: AsRef<str>>(
        &self,
        texts: &[S],
        category: LabelCategory,
    ) -> ApiResult<TextLabelsResponse> {
        let texts: Vec<&str> = texts.iter().map(AsRef::as_ref).collect();
        let body = json!({
            "text_inputs": texts,
            "label_category": category,
        });
        self.client.post(FOR_TEXT, &body).await
    }

    /// Casts with the highest (or lowest) score for a label
    ///
    /// POST /casts/labels/top-items
    pub async fn top_items(&self, label: &str, options: Options) -> ApiResult<CastFeedResponse> {
        let body = merge_options(options, [("label", json!(label))]);
        self.client.post(TOP_ITEMS, &body).await
    }
}
