//! Plain-text presentation of feature results.

use std::fmt::Write as _;

use fashion_core::{
    AntiRecommendationResponse, ApprovalResponse, CulturalFusionResponse, FashionItem,
    HealthState, SearchResponse, SuggestionResponse, TwinResponse,
};
use fashion_http::FashionApiClient;
use serde_json::Value;

const ITEM_FALLBACK_BLURB: &str = "Stylish fashion item";
const FUSION_FALLBACK_BLURB: &str = "Cultural fusion piece";

pub fn health(state: HealthState, base_url: &str) -> String {
    format!("backend {base_url}: {}", state.label())
}

pub fn search(client: &FashionApiClient, response: &SearchResponse) -> String {
    let mut out = format!("Found {} item(s)\n", response.items.len());
    push_items(&mut out, client, &response.items, ITEM_FALLBACK_BLURB);
    out
}

pub fn suggestions(client: &FashionApiClient, response: &SuggestionResponse) -> String {
    let mut out = format!("{}\n", response.message());
    push_items(&mut out, client, &response.items, ITEM_FALLBACK_BLURB);
    out
}

pub fn fusion(client: &FashionApiClient, response: &CulturalFusionResponse) -> String {
    let mut out = format!("Blend: {}\n", response.cultural_blend);
    if let Some(description) = &response.description {
        let _ = writeln!(out, "{description}");
    }
    push_items(&mut out, client, &response.items, FUSION_FALLBACK_BLURB);
    out
}

pub fn approval(response: &ApprovalResponse) -> String {
    let mut out = format!(
        "{}\nAffinity Score: {}% ({})\n{}\n",
        response.approval,
        (response.affinity_score * 100.0).round() as i64,
        response.tier().label(),
        response.message
    );
    match &response.style_analysis {
        Some(Value::String(analysis)) => {
            let _ = writeln!(out, "Style analysis: {analysis}");
        }
        Some(analysis) if !analysis.is_null() => {
            let _ = writeln!(out, "Style analysis: {analysis}");
        }
        _ => {}
    }
    out
}

pub fn twin(client: &FashionApiClient, response: &TwinResponse) -> String {
    let mut out = String::new();
    if let Some(user) = &response.twin_user_id {
        let _ = writeln!(out, "Fashion twin: {user}");
    }
    if let Some(score) = response.similarity_score {
        let _ = writeln!(out, "Similarity: {}%", (score * 100.0).round() as i64);
    }
    if let Some(message) = response.message.as_ref().or(response.note.as_ref()) {
        let _ = writeln!(out, "{message}");
    }
    if let Some(items) = &response.twin_items {
        push_items(&mut out, client, items, ITEM_FALLBACK_BLURB);
    }
    out
}

pub fn unique(client: &FashionApiClient, response: &AntiRecommendationResponse) -> String {
    let mut out = format!("{} unexpected pick(s)\n", response.items.len());
    push_items(&mut out, client, &response.items, ITEM_FALLBACK_BLURB);
    out
}

/// Payloads without a fixed shape are printed as indented JSON.
pub fn json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn push_items(out: &mut String, client: &FashionApiClient, items: &[FashionItem], blurb: &str) {
    for item in items {
        let id = item.original_id.as_deref().unwrap_or(&item.id);
        let colors = match &item.secondary_color {
            Some(secondary) => format!("{}/{secondary}", item.dominant_color),
            None => item.dominant_color.clone(),
        };
        let text = item
            .description
            .as_deref()
            .or(item.pattern_description.as_deref())
            .or(item.remarks.as_deref())
            .unwrap_or(blurb);
        let _ = writeln!(out, "  #{id} {} | {colors} | {text}", item.clothing_type);
        if !item.occasion_suitability.is_empty() {
            let _ = writeln!(out, "      occasions: {}", item.occasion_suitability.join(", "));
        }
        if let Some(path) = &item.image_url {
            let _ = writeln!(out, "      image: {}", client.asset_url(path));
        }
    }
}
