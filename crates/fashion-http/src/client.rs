use std::time::{Duration, Instant};

use fashion_core::{
    AntiRecommendationByDescriptionRequest, AntiRecommendationByItemRequest,
    AntiRecommendationResponse, ApiError, ApprovalRequest, ApprovalResponse,
    CulturalFusionRequest, CulturalFusionResponse, CulturalInsightsRequest, HttpMethod,
    ItemFilters, Operation, RequestDescriptor, SearchRequest, SearchResponse, StyleImage,
    SuggestionRequest, SuggestionResponse, TwinByPreferencesRequest, TwinByUserRequest,
    TwinResponse,
};
use reqwest::{
    RequestBuilder,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Base endpoint the reference backend listens on.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const STYLE_IMAGE_PART: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Whole-request timeout. `None` leaves timing to the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("invalid base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Transport client for the fashion recommendation service.
///
/// Every operation performs exactly one round trip and resolves to the typed
/// payload or an [`ApiError`]. Nothing is retried here. Cloning is cheap and
/// clones share the connection pool.
#[derive(Debug, Clone)]
pub struct FashionApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl FashionApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientBuildError> {
        let base_url =
            Url::parse(config.base_url.trim()).map_err(|source| ClientBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientBuildError::UnsupportedScheme(config.base_url));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an `image_url` from a payload against the base endpoint.
    /// Absolute http(s) URLs are returned unchanged.
    pub fn asset_url(&self, path: &str) -> String {
        if let Ok(absolute) = Url::parse(path)
            && matches!(absolute.scheme(), "http" | "https")
        {
            return absolute.into();
        }
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn health_check(&self) -> Result<Value, ApiError> {
        self.execute(RequestDescriptor::empty(Operation::HealthCheck))
            .await
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        self.execute(RequestDescriptor::new(Operation::Search, request)?)
            .await
    }

    pub async fn get_actionable_suggestions(
        &self,
        request: &SuggestionRequest,
    ) -> Result<SuggestionResponse, ApiError> {
        self.execute(RequestDescriptor::new(
            Operation::ActionableSuggestions,
            request,
        )?)
        .await
    }

    pub async fn get_mixed_culture_recommendations(
        &self,
        request: &CulturalFusionRequest,
    ) -> Result<CulturalFusionResponse, ApiError> {
        self.execute(RequestDescriptor::new(Operation::CulturalFusion, request)?)
            .await
    }

    pub async fn get_choice_approval(
        &self,
        request: &ApprovalRequest,
    ) -> Result<ApprovalResponse, ApiError> {
        self.execute(RequestDescriptor::new(Operation::ChoiceApproval, request)?)
            .await
    }

    pub async fn find_twin_by_user(
        &self,
        request: &TwinByUserRequest,
    ) -> Result<TwinResponse, ApiError> {
        self.execute(RequestDescriptor::new(Operation::FindTwinByUser, request)?)
            .await
    }

    pub async fn find_twin_by_preferences(
        &self,
        request: &TwinByPreferencesRequest,
    ) -> Result<TwinResponse, ApiError> {
        self.execute(RequestDescriptor::new(
            Operation::FindTwinByPreferences,
            request,
        )?)
        .await
    }

    pub async fn get_anti_recommendations_by_description(
        &self,
        request: &AntiRecommendationByDescriptionRequest,
    ) -> Result<AntiRecommendationResponse, ApiError> {
        self.execute(RequestDescriptor::new(
            Operation::AntiRecommendationsByDescription,
            request,
        )?)
        .await
    }

    pub async fn get_anti_recommendations_by_item(
        &self,
        request: &AntiRecommendationByItemRequest,
    ) -> Result<AntiRecommendationResponse, ApiError> {
        self.execute(RequestDescriptor::new(
            Operation::AntiRecommendationsByItem,
            request,
        )?)
        .await
    }

    pub async fn filter_items(&self, filters: &ItemFilters) -> Result<Value, ApiError> {
        self.execute(RequestDescriptor::new(Operation::FilterItems, filters)?)
            .await
    }

    pub async fn get_recommendations(&self) -> Result<Value, ApiError> {
        self.execute(RequestDescriptor::empty(Operation::Recommendations))
            .await
    }

    pub async fn get_cultural_insights(
        &self,
        request: &CulturalInsightsRequest,
    ) -> Result<Map<String, Value>, ApiError> {
        self.execute(RequestDescriptor::new(Operation::CulturalInsights, request)?)
            .await
    }

    /// Upload an image as the `file` part of a multipart form.
    pub async fn analyze_fashion_style(&self, image: StyleImage) -> Result<Value, ApiError> {
        let operation = Operation::AnalyzeStyle;
        let descriptor = RequestDescriptor::new(
            operation,
            &json!({
                "file_name": image.file_name,
                "content_type": image.content_type,
                "size": image.bytes.len(),
            }),
        )?;

        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|err| {
                ApiError::unclassified(operation.fallback_message(), Some(err.to_string()))
            })?;
        let form = Form::new().part(STYLE_IMAGE_PART, part);
        let request = self.http.post(self.endpoint(operation.path())).multipart(form);

        self.dispatch(&descriptor, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, ApiError> {
        let operation = descriptor.operation();
        let url = self.endpoint(operation.path());
        let request = match operation.method() {
            HttpMethod::Get => self.http.get(url),
            HttpMethod::Post => self.http.post(url).json(descriptor.parameters()),
        };
        self.dispatch(&descriptor, request).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let operation = descriptor.operation();
        let request_id = descriptor.request_id();
        let started = Instant::now();
        debug!(
            operation = operation.name(),
            method = operation.method().as_str(),
            %request_id,
            "sending request"
        );

        let response = request
            .send()
            .await
            .map_err(|err| map_transport_error(descriptor, err))?;
        let status = response.status();
        let body = response.bytes().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            let status = status.as_u16();
            let err = ApiError::from_http_response(
                status,
                body.as_deref().ok(),
                &operation.http_fallback_message(status),
            );
            warn!(
                operation = operation.name(),
                %request_id,
                status,
                elapsed_ms,
                error = %err.message,
                "request rejected"
            );
            return Err(err);
        }

        let body = body.map_err(|err| map_transport_error(descriptor, err))?;
        debug!(
            operation = operation.name(),
            %request_id,
            status = status.as_u16(),
            elapsed_ms,
            bytes = body.len(),
            "response received"
        );

        decode_payload(operation, &body).inspect_err(|err| {
            warn!(
                operation = operation.name(),
                %request_id,
                details = ?err.details,
                "response failed validation"
            );
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

fn decode_payload<T: DeserializeOwned>(operation: Operation, body: &[u8]) -> Result<T, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ApiError::invalid_response(Some(err.to_string())))?;
    operation.response_shape().validate(&value)?;
    serde_json::from_value(value).map_err(|err| ApiError::invalid_response(Some(err.to_string())))
}

fn map_transport_error(descriptor: &RequestDescriptor, err: reqwest::Error) -> ApiError {
    let operation = descriptor.operation();
    warn!(
        operation = operation.name(),
        request_id = %descriptor.request_id(),
        timeout = err.is_timeout(),
        connect = err.is_connect(),
        error = %err,
        "request did not complete"
    );
    ApiError::network(operation.fallback_message())
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, Ordering},
        },
    };

    use axum::{
        Json, Router,
        body::Bytes,
        http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
        routing::{get, post},
    };
    use fashion_core::{AffinityTier, ApiErrorKind, INVALID_RESPONSE, NETWORK_ERROR};
    use tokio::net::TcpListener;

    use super::*;

    async fn serve(router: Router) -> FashionApiClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub server");
        });
        FashionApiClient::new(ClientConfig::new(format!("http://{addr}"))).expect("client")
    }

    async fn respond_everywhere(status: StatusCode, body: &'static str) -> FashionApiClient {
        serve(Router::new().fallback(move || async move {
            (status, [(CONTENT_TYPE, "application/json")], body)
        }))
        .await
    }

    fn sample_image() -> StyleImage {
        StyleImage {
            file_name: "look.jpg".to_owned(),
            content_type: "image/jpeg".to_owned(),
            bytes: vec![0xff, 0xd8, 0xff, 0xe0],
        }
    }

    async fn call(client: &FashionApiClient, operation: Operation) -> Result<(), ApiError> {
        match operation {
            Operation::HealthCheck => client.health_check().await.map(drop),
            Operation::Search => client
                .search(&SearchRequest {
                    query: "red dress".to_owned(),
                    style_preferences: None,
                })
                .await
                .map(drop),
            Operation::ActionableSuggestions => client
                .get_actionable_suggestions(&SuggestionRequest {
                    preferences: "minimalist".to_owned(),
                })
                .await
                .map(drop),
            Operation::CulturalFusion => client
                .get_mixed_culture_recommendations(&CulturalFusionRequest {
                    user_id: "user_123".to_owned(),
                    cultures: vec!["Japanese".to_owned(), "French".to_owned()],
                })
                .await
                .map(drop),
            Operation::ChoiceApproval => client
                .get_choice_approval(&ApprovalRequest {
                    item_description: "black leather jacket".to_owned(),
                    user_style: None,
                })
                .await
                .map(drop),
            Operation::FindTwinByUser => client
                .find_twin_by_user(&TwinByUserRequest {
                    user_id: "user_123".to_owned(),
                })
                .await
                .map(drop),
            Operation::FindTwinByPreferences => client
                .find_twin_by_preferences(&TwinByPreferencesRequest {
                    preferences: "vintage denim".to_owned(),
                })
                .await
                .map(drop),
            Operation::AntiRecommendationsByDescription => client
                .get_anti_recommendations_by_description(&AntiRecommendationByDescriptionRequest {
                    current_item_description: "white sneakers".to_owned(),
                    style_preferences: None,
                })
                .await
                .map(drop),
            Operation::AntiRecommendationsByItem => client
                .get_anti_recommendations_by_item(&AntiRecommendationByItemRequest {
                    user_id: "user_123".to_owned(),
                    current_item_id: "42".to_owned(),
                })
                .await
                .map(drop),
            Operation::FilterItems => client
                .filter_items(&ItemFilters {
                    clothing_type: Some("dress".to_owned()),
                    ..ItemFilters::default()
                })
                .await
                .map(drop),
            Operation::Recommendations => client.get_recommendations().await.map(drop),
            Operation::CulturalInsights => client
                .get_cultural_insights(&CulturalInsightsRequest {
                    style: "streetwear".to_owned(),
                })
                .await
                .map(drop),
            Operation::AnalyzeStyle => client.analyze_fashion_style(sample_image()).await.map(drop),
        }
    }

    #[test]
    fn rejects_unparsable_and_non_http_base_urls() {
        let err = FashionApiClient::new(ClientConfig::new("not a url")).expect_err("must fail");
        assert!(matches!(err, ClientBuildError::InvalidBaseUrl { .. }));

        let err =
            FashionApiClient::new(ClientConfig::new("ftp://example.org")).expect_err("must fail");
        assert!(matches!(err, ClientBuildError::UnsupportedScheme(_)));
    }

    #[test]
    fn endpoints_and_assets_resolve_against_base() {
        let client =
            FashionApiClient::new(ClientConfig::new("http://127.0.0.1:8000/api/")).expect("client");
        assert_eq!(
            client.endpoint(Operation::Search.path()),
            "http://127.0.0.1:8000/api/search"
        );
        assert_eq!(
            client.asset_url("/images/1.jpg"),
            "http://127.0.0.1:8000/api/images/1.jpg"
        );
        assert_eq!(
            client.asset_url("https://cdn.example.org/1.jpg"),
            "https://cdn.example.org/1.jpg"
        );
    }

    #[test]
    fn default_config_targets_local_backend_without_timeout() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout, None);
    }

    #[tokio::test]
    async fn connection_refused_is_network_error_for_every_operation() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
            listener.local_addr().expect("addr")
        };
        let client = FashionApiClient::new(ClientConfig::new(format!("http://{addr}")))
            .expect("client");

        for operation in Operation::ALL {
            let err = call(&client, operation)
                .await
                .expect_err("closed port must fail");
            assert_eq!(err.code.as_deref(), Some(NETWORK_ERROR), "{}", operation.name());
            assert_eq!(err.message, operation.fallback_message());
            assert_eq!(err.details, None);
        }
    }

    #[tokio::test]
    async fn error_body_message_wins_for_every_operation() {
        let client = respond_everywhere(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"X","details":{"field":"query"}}"#,
        )
        .await;

        for operation in Operation::ALL {
            let err = call(&client, operation).await.expect_err("422 must fail");
            assert_eq!(err.message, "X", "{}", operation.name());
            assert_eq!(err.code.as_deref(), Some("422"));
            assert_eq!(err.status(), Some(422));
            assert!(err.details.is_some());
        }
    }

    #[tokio::test]
    async fn unparsable_error_body_uses_http_fallback() {
        let client = serve(Router::new().fallback(|| async {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }))
        .await;

        for operation in Operation::ALL {
            let err = call(&client, operation).await.expect_err("500 must fail");
            assert_eq!(err.code.as_deref(), Some("500"));
            assert_eq!(err.message, operation.http_fallback_message(500));
        }
        let err = call(&client, Operation::Search).await.expect_err("500");
        assert_eq!(err.message, "Search failed with status 500");
    }

    #[tokio::test]
    async fn framework_detail_is_used_when_message_is_missing() {
        let client = respond_everywhere(StatusCode::NOT_FOUND, r#"{"detail":"Item not found"}"#).await;
        let err = call(&client, Operation::AntiRecommendationsByItem)
            .await
            .expect_err("404 must fail");
        assert_eq!(err.message, "Item not found");
        assert_eq!(err.details, Some(json!("Item not found")));
    }

    #[tokio::test]
    async fn missing_items_sequence_is_invalid_response() {
        let client = respond_everywhere(StatusCode::OK, r#"{"results":[]}"#).await;

        for operation in [
            Operation::Search,
            Operation::ActionableSuggestions,
            Operation::CulturalFusion,
            Operation::AntiRecommendationsByDescription,
            Operation::AntiRecommendationsByItem,
        ] {
            let err = call(&client, operation)
                .await
                .expect_err("payload without items must fail");
            assert_eq!(err.code.as_deref(), Some(INVALID_RESPONSE), "{}", operation.name());
            assert_eq!(err.message, "Invalid response format from server");
        }

        // Operations without a declared shape pass the payload through.
        call(&client, Operation::FilterItems)
            .await
            .expect("filter has no shape");
        call(&client, Operation::Recommendations)
            .await
            .expect("recommendations have no shape");
    }

    #[tokio::test]
    async fn non_json_success_body_is_invalid_response() {
        let client = serve(Router::new().fallback(|| async { (StatusCode::OK, "<html>") })).await;
        let err = call(&client, Operation::HealthCheck)
            .await
            .expect_err("html is not json");
        assert_eq!(err.kind(), ApiErrorKind::InvalidResponse);
    }

    #[tokio::test]
    async fn search_returns_matching_dress() {
        let seen = Arc::new(Mutex::new(None));
        let seen_by_stub = Arc::clone(&seen);
        let client = serve(Router::new().route(
            "/search",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = Arc::clone(&seen_by_stub);
                async move {
                    let content_type = headers
                        .get(CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_owned);
                    *seen.lock().expect("seen lock") = Some((content_type, body));
                    Json(json!({
                        "items": [{
                            "id": "17",
                            "clothing_type": "dress",
                            "dominant_color": "red",
                            "occasion_suitability": ["casual"],
                            "image_url": "/images/17.jpg"
                        }],
                        "total": 1
                    }))
                }
            }),
        ))
        .await;

        let response = client
            .search(&SearchRequest {
                query: "a red summer dress for casual occasions".to_owned(),
                style_preferences: None,
            })
            .await
            .expect("search should succeed");

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].clothing_type, "dress");
        assert_eq!(response.extra.get("total"), Some(&json!(1)));

        let (content_type, body) = seen
            .lock()
            .expect("seen lock")
            .clone()
            .expect("stub saw request");
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(
            body,
            json!({"query": "a red summer dress for casual occasions"})
        );
    }

    #[tokio::test]
    async fn approval_maps_score_to_high_tier() {
        let client = serve(Router::new().route(
            "/get-approval",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["item_description"], "black leather jacket with jeans");
                Json(json!({
                    "approval": "Yes!",
                    "affinity_score": 0.82,
                    "message": "Great match"
                }))
            }),
        ))
        .await;

        let response = client
            .get_choice_approval(&ApprovalRequest {
                item_description: "black leather jacket with jeans".to_owned(),
                user_style: None,
            })
            .await
            .expect("approval should succeed");

        assert_eq!(response.approval, "Yes!");
        assert_eq!(response.tier(), AffinityTier::High);
    }

    #[tokio::test]
    async fn approval_without_numeric_score_is_invalid_response() {
        let client = respond_everywhere(
            StatusCode::OK,
            r#"{"approval":"Yes!","affinity_score":"high","message":"ok"}"#,
        )
        .await;
        let err = call(&client, Operation::ChoiceApproval)
            .await
            .expect_err("string score must fail");
        assert_eq!(err.kind(), ApiErrorKind::InvalidResponse);
    }

    #[tokio::test]
    async fn loosely_typed_items_still_decode() {
        let client = serve(Router::new().route(
            "/search",
            post(|| async { Json(json!({"items": [{"id": 17, "clothing_type": "dress"}]})) }),
        ))
        .await;

        let response = client
            .search(&SearchRequest {
                query: "dress".to_owned(),
                style_preferences: None,
            })
            .await
            .expect("numeric id should not fail the payload");
        assert_eq!(response.items[0].id, "17");
        assert_eq!(response.items[0].clothing_type, "dress");
    }

    #[tokio::test]
    async fn approval_with_partial_profile_decodes() {
        let client = serve(Router::new().route(
            "/get-approval",
            post(|| async {
                Json(json!({
                    "approval": "Good Choice!",
                    "affinity_score": 0.75,
                    "message": "ok",
                    "user_profile": {"color_preference": "earth tones"}
                }))
            }),
        ))
        .await;

        let response = client
            .get_choice_approval(&ApprovalRequest {
                item_description: "linen shirt".to_owned(),
                user_style: None,
            })
            .await
            .expect("partial profile should not fail the payload");
        assert_eq!(response.tier(), AffinityTier::Good);
        let profile = response.user_profile().expect("profile object");
        assert_eq!(profile.color_preference, ["earth tones"]);
    }

    #[tokio::test]
    async fn non_object_item_is_invalid_response() {
        let client = respond_everywhere(StatusCode::OK, r#"{"items":[{"id":"1"},"dress"]}"#).await;
        let err = call(&client, Operation::Search)
            .await
            .expect_err("scalar item must fail");
        assert_eq!(err.kind(), ApiErrorKind::InvalidResponse);
        assert_eq!(
            err.details,
            Some(json!("field 'items' element 1 must be an object, found string"))
        );
    }

    #[tokio::test]
    async fn recommendations_use_get() {
        let client = serve(Router::new().route(
            "/recommendations",
            get(|| async { Json(json!({"recommendations": []})) }),
        ))
        .await;
        let payload = client.get_recommendations().await.expect("get should succeed");
        assert_eq!(payload, json!({"recommendations": []}));
    }

    #[tokio::test]
    async fn style_analysis_uploads_multipart_file_part() {
        let client = serve(Router::new().route(
            "/analyze-style",
            post(|headers: HeaderMap, body: Bytes| async move {
                let content_type = headers
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                let body = String::from_utf8_lossy(&body);
                if content_type.starts_with("multipart/form-data")
                    && body.contains(r#"name="file""#)
                    && body.contains(r#"filename="look.jpg""#)
                {
                    (StatusCode::OK, Json(json!({"style": "edgy"})))
                } else {
                    (StatusCode::BAD_REQUEST, Json(json!({"message": "no file"})))
                }
            }),
        ))
        .await;

        let payload = client
            .analyze_fashion_style(sample_image())
            .await
            .expect("upload should succeed");
        assert_eq!(payload["style"], "edgy");
    }

    #[tokio::test]
    async fn health_check_reflects_stub_switch() {
        let healthy = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&healthy);
        let client = serve(Router::new().route(
            "/health",
            get(move || {
                let flag = Arc::clone(&flag);
                async move {
                    if flag.load(Ordering::SeqCst) {
                        (StatusCode::OK, Json(json!({"status": "ok"})))
                    } else {
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(json!({"detail": "index not loaded"})),
                        )
                    }
                }
            }),
        ))
        .await;

        let err = client.health_check().await.expect_err("unhealthy");
        assert_eq!(err.code.as_deref(), Some("500"));
        healthy.store(true, Ordering::SeqCst);
        client.health_check().await.expect("healthy");
    }

    #[tokio::test]
    #[ignore = "runs against live backend, requires FASHION_API_BASE_URL"]
    async fn live_health_and_search_smoke() {
        let base_url = env::var("FASHION_API_BASE_URL").expect("FASHION_API_BASE_URL must be set");
        let client = FashionApiClient::new(ClientConfig::new(base_url)).expect("client");

        client.health_check().await.expect("health");
        client
            .search(&SearchRequest {
                query: "red dress".to_owned(),
                style_preferences: None,
            })
            .await
            .expect("search");
    }
}
