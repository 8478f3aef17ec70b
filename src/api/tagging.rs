//! Tagging request/result envelopes

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_resource_arn, validate_tags};
use crate::domain::render::impl_render_display;
use crate::domain::TagRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListTagsForResourceRequest {
    /// Page size, 1-50
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    #[validate(custom(function = "validate_resource_arn"))]
    pub resource_arn: String,
}

impl ListTagsForResourceRequest {
    pub fn new(resource_arn: impl Into<String>) -> Self {
        Self { limit: None, next_token: None, resource_arn: resource_arn.into() }
    }

    pub fn with_limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_next_token(mut self, next_token: impl Into<String>) -> Self {
        self.next_token = Some(next_token.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTagsForResourceResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    pub tags: Vec<TagRef>,
}

/// Add or overwrite tags on a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TagResourceRequest {
    #[validate(custom(function = "validate_resource_arn"))]
    pub resource_arn: String,

    #[validate(length(max = 50), custom(function = "validate_tags"))]
    pub tags: Vec<TagRef>,
}

impl TagResourceRequest {
    pub fn new(resource_arn: impl Into<String>, tags: Vec<TagRef>) -> Self {
        Self { resource_arn: resource_arn.into(), tags }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagResourceResult {}

/// Remove tags by key; unknown keys are ignored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UntagResourceRequest {
    #[validate(custom(function = "validate_resource_arn"))]
    pub resource_arn: String,

    #[validate(length(max = 50))]
    pub tag_keys: Vec<String>,
}

impl UntagResourceRequest {
    pub fn new<I, S>(resource_arn: impl Into<String>, tag_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resource_arn: resource_arn.into(),
            tag_keys: tag_keys.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UntagResourceResult {}

impl_render_display!(
    ListTagsForResourceRequest,
    ListTagsForResourceResult,
    TagResourceRequest,
    TagResourceResult,
    UntagResourceRequest,
    UntagResourceResult,
);
