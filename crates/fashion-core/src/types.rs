use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{lenient, selection::CultureSelection};

const DEFAULT_SUGGESTION_TYPE: &str = "fashion_recommendations";
const DEFAULT_SUGGESTION_MESSAGE: &str = "Here are some fashion suggestions:";

/// Backend reachability as seen by the health monitor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthState {
    /// No check has completed yet.
    Checking,
    /// Last completed check succeeded.
    Online,
    /// Last completed check failed.
    Offline,
}

impl HealthState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Checking => "Checking...",
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

/// Catalogue item returned by most recommendation endpoints.
///
/// Field decoding is tolerant: scalars of the wrong kind are stringified and
/// `null` reads as absent, so only the response shape rules reject a payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FashionItem {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_id: Option<String>,
    /// Asset path relative to the service base endpoint.
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub clothing_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub dominant_color: String,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub secondary_color: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub pattern_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub occasion_suitability: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub gender_suitability: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub sleeve_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub neckline: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub closure_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub pattern_description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub remarks: Option<String>,
    /// Free-text description (cultural fusion items).
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub style: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Style profile the backend infers from free-text preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StyleProfile {
    #[serde(default, deserialize_with = "lenient::string")]
    pub style_preference: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub color_preference: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub occasion_focus: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub personality: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StyleProfile {
    /// Profile read from a raw payload value; `None` unless it is an object.
    pub fn from_payload(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

/// `POST /search`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    #[serde(
        rename = "stylePreferences",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub style_preferences: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub items: Vec<FashionItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `POST /actionable-suggestions`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub preferences: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestionResponse {
    pub items: Vec<FashionItem>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub suggestion_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SuggestionResponse {
    pub fn suggestion_type(&self) -> &str {
        self.suggestion_type
            .as_deref()
            .unwrap_or(DEFAULT_SUGGESTION_TYPE)
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_SUGGESTION_MESSAGE)
    }
}

/// `POST /cultural-fusion`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CulturalFusionRequest {
    pub user_id: String,
    pub cultures: Vec<String>,
}

impl CulturalFusionRequest {
    /// Request for a capped, de-duplicated culture selection.
    pub fn new(user_id: impl Into<String>, selection: CultureSelection) -> Self {
        Self {
            user_id: user_id.into(),
            cultures: selection.into_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CulturalFusionResponse {
    pub items: Vec<FashionItem>,
    #[serde(deserialize_with = "lenient::string")]
    pub cultural_blend: String,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `POST /get-approval`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApprovalRequest {
    pub item_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_style: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApprovalResponse {
    #[serde(deserialize_with = "lenient::string")]
    pub approval: String,
    pub affinity_score: f64,
    #[serde(deserialize_with = "lenient::string")]
    pub message: String,
    /// Free text or a structured breakdown, depending on the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_analysis: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApprovalResponse {
    pub fn user_profile(&self) -> Option<StyleProfile> {
        self.user_profile.as_ref().and_then(StyleProfile::from_payload)
    }

    pub fn tier(&self) -> AffinityTier {
        AffinityTier::from_score(self.affinity_score)
    }
}

/// Display tier for an approval affinity score in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AffinityTier {
    /// `>= 0.8`
    High,
    /// `>= 0.6`
    Good,
    /// `>= 0.4`
    Fair,
    Low,
}

impl AffinityTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::High
        } else if score >= 0.6 {
            Self::Good
        } else if score >= 0.4 {
            Self::Fair
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Low => "low",
        }
    }
}

/// `POST /find-twin` keyed by a known user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TwinByUserRequest {
    pub user_id: String,
}

/// `POST /find-twin` keyed by free-text preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TwinByPreferencesRequest {
    pub preferences: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TwinResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twin_items: Option<Vec<FashionItem>>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub twin_user_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub similarity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_preferences: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_profile: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TwinResponse {
    pub fn style_profile(&self) -> Option<StyleProfile> {
        self.style_profile.as_ref().and_then(StyleProfile::from_payload)
    }
}

/// `POST /anti-recommendations` keyed by an item description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AntiRecommendationByDescriptionRequest {
    pub current_item_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_preferences: Option<String>,
}

/// `POST /anti-recommendations` keyed by user and catalogue item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AntiRecommendationByItemRequest {
    pub user_id: String,
    pub current_item_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AntiRecommendationResponse {
    pub items: Vec<FashionItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `POST /filter-items`; unset fields are omitted from the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clothing_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion_suitability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_suitability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleeve_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neckline: Option<String>,
}

/// `POST /cultural-insights`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CulturalInsightsRequest {
    pub style: String,
}

/// Image uploaded to `POST /analyze-style`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleImage {
    pub file_name: String,
    /// MIME type, for example `image/jpeg`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}
