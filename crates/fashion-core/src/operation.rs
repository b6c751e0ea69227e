use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    error::ApiError,
    shape::{FieldRule, ResponseShape},
};

/// HTTP method used by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Backend capabilities exposed by the transport client.
///
/// Request shapes that drifted apart on the backend are separate variants
/// rather than one overloaded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    HealthCheck,
    Search,
    ActionableSuggestions,
    CulturalFusion,
    ChoiceApproval,
    FindTwinByUser,
    FindTwinByPreferences,
    AntiRecommendationsByDescription,
    AntiRecommendationsByItem,
    FilterItems,
    Recommendations,
    CulturalInsights,
    AnalyzeStyle,
}

const ITEMS_SHAPE: ResponseShape = ResponseShape::object_with(&[FieldRule::Records("items")]);
const FUSION_SHAPE: ResponseShape = ResponseShape::object_with(&[
    FieldRule::Records("items"),
    FieldRule::Present("cultural_blend"),
]);
const APPROVAL_SHAPE: ResponseShape = ResponseShape::object_with(&[
    FieldRule::Present("approval"),
    FieldRule::Number("affinity_score"),
    FieldRule::Present("message"),
]);
const TWIN_SHAPE: ResponseShape = ResponseShape::object_with(&[
    FieldRule::AnyOf(&["twin_items", "twin_user_id"]),
    FieldRule::OptionalRecords("twin_items"),
]);

impl Operation {
    pub const ALL: [Operation; 13] = [
        Operation::HealthCheck,
        Operation::Search,
        Operation::ActionableSuggestions,
        Operation::CulturalFusion,
        Operation::ChoiceApproval,
        Operation::FindTwinByUser,
        Operation::FindTwinByPreferences,
        Operation::AntiRecommendationsByDescription,
        Operation::AntiRecommendationsByItem,
        Operation::FilterItems,
        Operation::Recommendations,
        Operation::CulturalInsights,
        Operation::AnalyzeStyle,
    ];

    /// Stable name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::HealthCheck => "health_check",
            Self::Search => "search",
            Self::ActionableSuggestions => "actionable_suggestions",
            Self::CulturalFusion => "cultural_fusion",
            Self::ChoiceApproval => "choice_approval",
            Self::FindTwinByUser => "find_twin_by_user",
            Self::FindTwinByPreferences => "find_twin_by_preferences",
            Self::AntiRecommendationsByDescription => "anti_recommendations_by_description",
            Self::AntiRecommendationsByItem => "anti_recommendations_by_item",
            Self::FilterItems => "filter_items",
            Self::Recommendations => "recommendations",
            Self::CulturalInsights => "cultural_insights",
            Self::AnalyzeStyle => "analyze_style",
        }
    }

    pub fn method(self) -> HttpMethod {
        match self {
            Self::HealthCheck | Self::Recommendations => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }

    /// Path relative to the configured base endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Self::HealthCheck => "/health",
            Self::Search => "/search",
            Self::ActionableSuggestions => "/actionable-suggestions",
            Self::CulturalFusion => "/cultural-fusion",
            Self::ChoiceApproval => "/get-approval",
            Self::FindTwinByUser | Self::FindTwinByPreferences => "/find-twin",
            Self::AntiRecommendationsByDescription | Self::AntiRecommendationsByItem => {
                "/anti-recommendations"
            }
            Self::FilterItems => "/filter-items",
            Self::Recommendations => "/recommendations",
            Self::CulturalInsights => "/cultural-insights",
            Self::AnalyzeStyle => "/analyze-style",
        }
    }

    pub fn is_idempotent(self) -> bool {
        self.method() == HttpMethod::Get
    }

    /// Message shown when the request never completed.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::HealthCheck => "Health check failed",
            Self::Search => "Search request failed",
            Self::ActionableSuggestions => "Failed to get inspiration",
            Self::CulturalFusion => "Failed to get cultural fusion recommendations",
            Self::ChoiceApproval => "Approval request failed",
            Self::FindTwinByUser | Self::FindTwinByPreferences => "Fashion twin search failed",
            Self::AntiRecommendationsByDescription | Self::AntiRecommendationsByItem => {
                "Failed to find unique style recommendations"
            }
            Self::FilterItems => "Filter request failed",
            Self::Recommendations => "Failed to fetch recommendations",
            Self::CulturalInsights => "Failed to fetch cultural insights",
            Self::AnalyzeStyle => "Style analysis failed",
        }
    }

    /// Message shown for a non-success status without a usable body message.
    pub fn http_fallback_message(self, status: u16) -> String {
        match self {
            Self::Search => format!("Search failed with status {status}"),
            other => other.fallback_message().to_owned(),
        }
    }

    /// Minimal shape a successful payload must have.
    pub fn response_shape(self) -> ResponseShape {
        match self {
            Self::Search
            | Self::ActionableSuggestions
            | Self::AntiRecommendationsByDescription
            | Self::AntiRecommendationsByItem => ITEMS_SHAPE,
            Self::CulturalFusion => FUSION_SHAPE,
            Self::ChoiceApproval => APPROVAL_SHAPE,
            Self::FindTwinByUser | Self::FindTwinByPreferences => TWIN_SHAPE,
            Self::CulturalInsights => ResponseShape::OBJECT,
            Self::HealthCheck | Self::FilterItems | Self::Recommendations | Self::AnalyzeStyle => {
                ResponseShape::ANY
            }
        }
    }
}

/// One call's worth of request data. Built at call time, dropped once the
/// call resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    operation: Operation,
    parameters: Map<String, Value>,
    request_id: Uuid,
}

impl RequestDescriptor {
    /// Descriptor for a parameterless read.
    pub fn empty(operation: Operation) -> Self {
        Self {
            operation,
            parameters: Map::new(),
            request_id: Uuid::new_v4(),
        }
    }

    /// Serialize `params` into an ordered field mapping.
    pub fn new<P: Serialize + ?Sized>(operation: Operation, params: &P) -> Result<Self, ApiError> {
        let value = serde_json::to_value(params).map_err(|err| {
            ApiError::unclassified(operation.fallback_message(), Some(err.to_string()))
        })?;
        let Value::Object(parameters) = value else {
            return Err(ApiError::unclassified(
                operation.fallback_message(),
                Some("request parameters must serialize to a field mapping".to_owned()),
            ));
        };

        Ok(Self {
            operation,
            parameters,
            request_id: Uuid::new_v4(),
        })
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    pub fn idempotent(&self) -> bool {
        self.operation.is_idempotent()
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ApiErrorKind;

    #[derive(Serialize)]
    struct Query<'a> {
        query: &'a str,
        #[serde(rename = "stylePreferences", skip_serializing_if = "Option::is_none")]
        style_preferences: Option<&'a str>,
    }

    #[test]
    fn only_reads_use_get_and_are_idempotent() {
        for op in Operation::ALL {
            let is_read = matches!(op, Operation::HealthCheck | Operation::Recommendations);
            assert_eq!(op.method() == HttpMethod::Get, is_read, "{}", op.name());
            assert_eq!(op.is_idempotent(), is_read);
        }
    }

    #[test]
    fn drifted_variants_share_a_path() {
        assert_eq!(
            Operation::FindTwinByUser.path(),
            Operation::FindTwinByPreferences.path()
        );
        assert_eq!(
            Operation::AntiRecommendationsByItem.path(),
            Operation::AntiRecommendationsByDescription.path()
        );
        assert_eq!(Operation::ChoiceApproval.path(), "/get-approval");
    }

    #[test]
    fn search_http_fallback_mentions_status() {
        assert_eq!(
            Operation::Search.http_fallback_message(503),
            "Search failed with status 503"
        );
        assert_eq!(
            Operation::FilterItems.http_fallback_message(503),
            "Filter request failed"
        );
    }

    #[test]
    fn descriptor_preserves_parameter_order() {
        let descriptor = RequestDescriptor::new(
            Operation::Search,
            &Query {
                query: "red dress",
                style_preferences: Some("boho"),
            },
        )
        .expect("descriptor should build");

        let keys: Vec<_> = descriptor.parameters().keys().cloned().collect();
        assert_eq!(keys, ["query", "stylePreferences"]);
        assert!(!descriptor.idempotent());
        assert_eq!(
            Value::Object(descriptor.parameters().clone()),
            json!({"query": "red dress", "stylePreferences": "boho"})
        );
    }

    #[test]
    fn descriptor_rejects_non_mapping_parameters() {
        let err = RequestDescriptor::new(Operation::FilterItems, &["clothing_type"])
            .expect_err("arrays are not field mappings");
        assert_eq!(err.kind(), ApiErrorKind::Unclassified);
        assert_eq!(err.message, "Filter request failed");
    }

    #[test]
    fn descriptors_get_distinct_request_ids() {
        let a = RequestDescriptor::empty(Operation::HealthCheck);
        let b = RequestDescriptor::empty(Operation::HealthCheck);
        assert_ne!(a.request_id(), b.request_id());
        assert!(a.parameters().is_empty());
        assert!(a.idempotent());
    }
}
