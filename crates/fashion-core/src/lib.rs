//! Request/response orchestration core for the fashion recommendation client.
//!
//! This crate defines the error model, the operation catalogue with its
//! response-shape checks, per-feature request state controllers, and the
//! backend health monitor. Transport lives in `fashion-http`.

/// Unified error value and HTTP error normalization.
pub mod error;
/// Periodic backend reachability polling.
pub mod health;
mod lenient;
/// Operation catalogue and per-call request descriptors.
pub mod operation;
/// Per-feature request lifecycle with stale-result suppression.
pub mod request_state;
/// Capped culture tag selection for fusion requests.
pub mod selection;
/// Structural validation of success payloads.
pub mod shape;
/// Request and response payload types.
pub mod types;

pub use error::{ApiError, ApiErrorKind, INVALID_RESPONSE, NETWORK_ERROR};
pub use health::{DEFAULT_HEALTH_INTERVAL, HealthMonitor};
pub use operation::{HttpMethod, Operation, RequestDescriptor};
pub use request_state::{RequestController, RequestState, SubmitOutcome};
pub use selection::{CultureSelection, MAX_CULTURES, POPULAR_CULTURES, SelectionError};
pub use shape::{FieldRule, ResponseShape, ShapeViolation};
pub use types::{
    AffinityTier, AntiRecommendationByDescriptionRequest, AntiRecommendationByItemRequest,
    AntiRecommendationResponse, ApprovalRequest, ApprovalResponse, CulturalFusionRequest,
    CulturalFusionResponse, CulturalInsightsRequest, FashionItem, HealthState, ItemFilters,
    SearchRequest, SearchResponse, StyleImage, StyleProfile, SuggestionRequest,
    SuggestionResponse, TwinByPreferencesRequest, TwinByUserRequest, TwinResponse,
};
