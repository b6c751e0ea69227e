//! Feature bindings: one [`RequestController`] per client operation.

use std::{future::Future, time::Duration};

use fashion_core::{
    AntiRecommendationByDescriptionRequest, AntiRecommendationByItemRequest,
    AntiRecommendationResponse, ApiError, ApprovalRequest, ApprovalResponse,
    CulturalFusionRequest, CulturalFusionResponse, CulturalInsightsRequest, HealthMonitor,
    ItemFilters, RequestController, SearchRequest, SearchResponse, StyleImage, SuggestionRequest,
    SuggestionResponse, TwinByPreferencesRequest, TwinByUserRequest, TwinResponse,
};
use serde_json::{Map, Value};

use crate::client::FashionApiClient;

pub type SearchController = RequestController<SearchRequest, SearchResponse>;
pub type SuggestionController = RequestController<SuggestionRequest, SuggestionResponse>;
pub type FusionController = RequestController<CulturalFusionRequest, CulturalFusionResponse>;
pub type ApprovalController = RequestController<ApprovalRequest, ApprovalResponse>;
pub type TwinByUserController = RequestController<TwinByUserRequest, TwinResponse>;
pub type TwinByPreferencesController = RequestController<TwinByPreferencesRequest, TwinResponse>;
pub type UniqueByDescriptionController =
    RequestController<AntiRecommendationByDescriptionRequest, AntiRecommendationResponse>;
pub type UniqueByItemController =
    RequestController<AntiRecommendationByItemRequest, AntiRecommendationResponse>;
pub type FilterController = RequestController<ItemFilters, Value>;
pub type RecommendationsController = RequestController<(), Value>;
pub type InsightsController = RequestController<CulturalInsightsRequest, Map<String, Value>>;
pub type StyleAnalysisController = RequestController<StyleImage, Value>;

fn bind<P, T, F, Fut>(
    client: &FashionApiClient,
    feature: &'static str,
    call: F,
) -> RequestController<P, T>
where
    P: Clone + Send + 'static,
    T: Clone + Send + Sync + 'static,
    F: Fn(FashionApiClient, P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    let client = client.clone();
    RequestController::new(feature, move |params| call(client.clone(), params))
}

pub fn search(client: &FashionApiClient) -> SearchController {
    bind(client, "search", |client, request: SearchRequest| async move {
        client.search(&request).await
    })
}

pub fn suggestions(client: &FashionApiClient) -> SuggestionController {
    bind(
        client,
        "suggestions",
        |client, request: SuggestionRequest| async move {
            client.get_actionable_suggestions(&request).await
        },
    )
}

pub fn cultural_fusion(client: &FashionApiClient) -> FusionController {
    bind(
        client,
        "cultural_fusion",
        |client, request: CulturalFusionRequest| async move {
            client.get_mixed_culture_recommendations(&request).await
        },
    )
}

pub fn approval(client: &FashionApiClient) -> ApprovalController {
    bind(client, "approval", |client, request: ApprovalRequest| async move {
        client.get_choice_approval(&request).await
    })
}

pub fn twin_by_user(client: &FashionApiClient) -> TwinByUserController {
    bind(client, "twin", |client, request: TwinByUserRequest| async move {
        client.find_twin_by_user(&request).await
    })
}

pub fn twin_by_preferences(client: &FashionApiClient) -> TwinByPreferencesController {
    bind(
        client,
        "twin",
        |client, request: TwinByPreferencesRequest| async move {
            client.find_twin_by_preferences(&request).await
        },
    )
}

pub fn unique_by_description(client: &FashionApiClient) -> UniqueByDescriptionController {
    bind(
        client,
        "unique_style",
        |client, request: AntiRecommendationByDescriptionRequest| async move {
            client.get_anti_recommendations_by_description(&request).await
        },
    )
}

pub fn unique_by_item(client: &FashionApiClient) -> UniqueByItemController {
    bind(
        client,
        "unique_style",
        |client, request: AntiRecommendationByItemRequest| async move {
            client.get_anti_recommendations_by_item(&request).await
        },
    )
}

pub fn filter(client: &FashionApiClient) -> FilterController {
    bind(client, "filter", |client, filters: ItemFilters| async move {
        client.filter_items(&filters).await
    })
}

pub fn recommendations(client: &FashionApiClient) -> RecommendationsController {
    bind(client, "recommendations", |client, ()| async move {
        client.get_recommendations().await
    })
}

pub fn cultural_insights(client: &FashionApiClient) -> InsightsController {
    bind(
        client,
        "cultural_insights",
        |client, request: CulturalInsightsRequest| async move {
            client.get_cultural_insights(&request).await
        },
    )
}

pub fn style_analysis(client: &FashionApiClient) -> StyleAnalysisController {
    bind(
        client,
        "style_analysis",
        |client, image: StyleImage| async move { client.analyze_fashion_style(image).await },
    )
}

/// Start polling `GET /health` every `period`.
pub fn health_monitor(client: &FashionApiClient, period: Duration) -> HealthMonitor {
    let client = client.clone();
    HealthMonitor::start(
        move || {
            let client = client.clone();
            async move { client.health_check().await }
        },
        period,
    )
}
