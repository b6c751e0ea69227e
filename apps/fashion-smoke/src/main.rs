use std::{env, process::ExitCode};

use fashion_core::SearchRequest;
use fashion_http::{ClientConfig, DEFAULT_BASE_URL, FashionApiClient};

const SMOKE_QUERY: &str = "red dress";

#[tokio::main]
async fn main() -> ExitCode {
    let base_url = env::var("FASHION_API_BASE_URL")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

    let client = match FashionApiClient::new(ClientConfig::new(base_url.clone())) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Failed to build client: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Testing connection to fashion backend at {base_url}...");
    match client.health_check().await {
        Ok(payload) => println!("Health check: {payload}"),
        Err(err) => {
            eprintln!("Connection failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    let request = SearchRequest {
        query: SMOKE_QUERY.to_owned(),
        style_preferences: None,
    };
    match client.search(&request).await {
        Ok(response) => println!("Search test: {} item(s) for '{SMOKE_QUERY}'", response.items.len()),
        Err(err) => {
            eprintln!("Connection failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    println!("Connection successful");
    ExitCode::SUCCESS
}
