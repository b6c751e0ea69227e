mod config;
mod logging;
mod render;

use std::{
    io::{IsTerminal, Write as _},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{ArgGroup, Parser, Subcommand};
use config::{CliConfig, ConfigError};
use fashion_core::{
    AntiRecommendationByDescriptionRequest, AntiRecommendationByItemRequest, ApprovalRequest,
    CulturalFusionRequest, CulturalInsightsRequest, CultureSelection, HealthState, ItemFilters,
    POPULAR_CULTURES, RequestController, RequestState, SearchRequest, SelectionError, StyleImage,
    SuggestionRequest, TwinByPreferencesRequest, TwinByUserRequest,
};
use fashion_http::{ClientBuildError, FashionApiClient, features};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "fashion-cli", version)]
#[command(about = "Terminal client for the fashion recommendation service")]
struct Cli {
    /// Service base URL (overrides FASHION_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check backend reachability once
    Health,

    /// Poll backend reachability and print every state change
    WatchHealth {
        /// Seconds between checks (overrides FASHION_HEALTH_INTERVAL_SECS)
        #[arg(long)]
        interval_secs: Option<u64>,

        /// Exit after this many state changes
        #[arg(long)]
        changes: Option<usize>,
    },

    /// Natural-language catalogue search
    Search {
        /// What you are looking for
        query: String,

        /// Free-text style preferences used for personalization
        #[arg(long)]
        style: Option<String>,
    },

    /// Outfit inspiration from free-text preferences
    Suggest {
        /// Preferences, e.g. "minimalist office wear"
        preferences: String,
    },

    /// Blend several cultural styles
    Fuse {
        /// User identifier sent with the request
        #[arg(long, required_unless_present = "list")]
        user_id: Option<String>,

        /// Culture tags (see --list for popular choices)
        #[arg(required_unless_present = "list")]
        cultures: Vec<String>,

        /// Print the popular culture tags and exit
        #[arg(long)]
        list: bool,
    },

    /// Ask whether an item suits your style
    Approve {
        /// Item description, e.g. "black leather jacket with jeans"
        item_description: String,

        /// Your style, e.g. "I prefer minimalist, professional styles"
        #[arg(long)]
        style: Option<String>,
    },

    /// Find a user with a similar style
    #[command(group(ArgGroup::new("key").required(true).args(["preferences", "user_id"])))]
    Twin {
        /// Free-text style preferences
        preferences: Option<String>,

        /// Match against a known user instead
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Recommendations that deliberately break from an item
    #[command(group(ArgGroup::new("anchor").required(true).args(["description", "item_id"])))]
    Unique {
        /// Description of the item you currently wear
        description: Option<String>,

        /// Style preferences to steer away from
        #[arg(long, requires = "description")]
        style: Option<String>,

        /// Catalogue item id (requires --user-id)
        #[arg(long, requires = "user_id")]
        item_id: Option<String>,

        #[arg(long)]
        user_id: Option<String>,
    },

    /// Filter the catalogue by attributes
    Filter {
        #[arg(long)]
        clothing_type: Option<String>,
        #[arg(long)]
        dominant_color: Option<String>,
        #[arg(long)]
        pattern_type: Option<String>,
        #[arg(long)]
        occasion: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        sleeve_type: Option<String>,
        #[arg(long)]
        neckline: Option<String>,
    },

    /// Raw recommendation feed
    Recommendations,

    /// Cultural background of a style
    Insights {
        /// Style name, e.g. "streetwear"
        style: String,
    },

    /// Upload an outfit photo for style analysis
    Analyze {
        /// Image file (jpg, png, gif or webp)
        image: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] ClientBuildError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("{0} must not be empty")]
    EmptyInput(&'static str),
    #[error("failed to read {path}: {source}")]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let config = CliConfig::from_env()?.with_base_url(cli.base_url)?;
    let client = FashionApiClient::new(config.client_config())?;
    info!(base_url = %client.base_url(), "fashion-cli starting");

    let code = match cli.command {
        Command::Health => check_health_once(&client).await,
        Command::WatchHealth {
            interval_secs,
            changes,
        } => {
            let period = interval_secs
                .filter(|secs| *secs > 0)
                .map_or(config.health_interval, std::time::Duration::from_secs);
            watch_health(&client, period, changes).await
        }
        Command::Search { query, style } => {
            let request = SearchRequest {
                query: require_text("query", query)?,
                style_preferences: optional_text(style),
            };
            run_feature(features::search(&client), request, |r| {
                render::search(&client, r)
            })
            .await
        }
        Command::Suggest { preferences } => {
            let request = SuggestionRequest {
                preferences: require_text("preferences", preferences)?,
            };
            run_feature(features::suggestions(&client), request, |r| {
                render::suggestions(&client, r)
            })
            .await
        }
        Command::Fuse { list: true, .. } => {
            println!("{}", POPULAR_CULTURES.join(", "));
            ExitCode::SUCCESS
        }
        Command::Fuse {
            user_id, cultures, ..
        } => {
            let user_id = require_text("user id", user_id.unwrap_or_default())?;
            let mut selection = CultureSelection::new(config.max_cultures);
            for culture in &cultures {
                selection.add(culture)?;
            }
            if selection.is_empty() {
                return Err(CliError::EmptyInput("cultures"));
            }
            let request = CulturalFusionRequest::new(user_id, selection);
            run_feature(features::cultural_fusion(&client), request, |r| {
                render::fusion(&client, r)
            })
            .await
        }
        Command::Approve {
            item_description,
            style,
        } => {
            let request = ApprovalRequest {
                item_description: require_text("item description", item_description)?,
                user_style: optional_text(style),
            };
            run_feature(features::approval(&client), request, render::approval).await
        }
        Command::Twin {
            user_id: Some(user_id),
            ..
        } => {
            let request = TwinByUserRequest {
                user_id: require_text("user id", user_id)?,
            };
            run_feature(features::twin_by_user(&client), request, |r| {
                render::twin(&client, r)
            })
            .await
        }
        Command::Twin { preferences, .. } => {
            let request = TwinByPreferencesRequest {
                preferences: require_text("preferences", preferences.unwrap_or_default())?,
            };
            run_feature(features::twin_by_preferences(&client), request, |r| {
                render::twin(&client, r)
            })
            .await
        }
        Command::Unique {
            item_id: Some(item_id),
            user_id,
            ..
        } => {
            let request = AntiRecommendationByItemRequest {
                user_id: require_text("user id", user_id.unwrap_or_default())?,
                current_item_id: require_text("item id", item_id)?,
            };
            run_feature(features::unique_by_item(&client), request, |r| {
                render::unique(&client, r)
            })
            .await
        }
        Command::Unique {
            description, style, ..
        } => {
            let request = AntiRecommendationByDescriptionRequest {
                current_item_description: require_text(
                    "item description",
                    description.unwrap_or_default(),
                )?,
                style_preferences: optional_text(style),
            };
            run_feature(features::unique_by_description(&client), request, |r| {
                render::unique(&client, r)
            })
            .await
        }
        Command::Filter {
            clothing_type,
            dominant_color,
            pattern_type,
            occasion,
            gender,
            sleeve_type,
            neckline,
        } => {
            let filters = ItemFilters {
                clothing_type: optional_text(clothing_type),
                dominant_color: optional_text(dominant_color),
                pattern_type: optional_text(pattern_type),
                occasion_suitability: optional_text(occasion),
                gender_suitability: optional_text(gender),
                sleeve_type: optional_text(sleeve_type),
                neckline: optional_text(neckline),
            };
            run_feature(features::filter(&client), filters, render::json).await
        }
        Command::Recommendations => {
            run_feature(features::recommendations(&client), (), render::json).await
        }
        Command::Insights { style } => {
            let request = CulturalInsightsRequest {
                style: require_text("style", style)?,
            };
            run_feature(features::cultural_insights(&client), request, |r| {
                render::json(&serde_json::Value::Object(r.clone()))
            })
            .await
        }
        Command::Analyze { image } => {
            let image = load_image(&image).await?;
            run_feature(features::style_analysis(&client), image, render::json).await
        }
    };

    Ok(code)
}

/// Submit once, render the terminal state and offer a manual retry on failure.
async fn run_feature<P, T, R>(controller: RequestController<P, T>, params: P, render: R) -> ExitCode
where
    P: Clone + Send + 'static,
    T: Clone + Send + Sync + 'static,
    R: Fn(&T) -> String,
{
    eprintln!("{}: loading...", controller.feature());
    controller.submit(params).await;
    let mut answers = BufReader::new(tokio::io::stdin());

    loop {
        match controller.state() {
            RequestState::Success(data) => {
                println!("{}", render(&data).trim_end());
                return ExitCode::SUCCESS;
            }
            RequestState::Failed(err) => {
                eprintln!("Error: {}", err.message);
                debug!(
                    feature = controller.feature(),
                    code = ?err.code,
                    details = ?err.details,
                    "feature failed"
                );
                if !confirm_retry(&mut answers).await {
                    return ExitCode::FAILURE;
                }
                eprintln!("{}: retrying...", controller.feature());
                controller.retry().await;
            }
            RequestState::Idle | RequestState::Loading => return ExitCode::FAILURE,
        }
    }
}

async fn check_health_once(client: &FashionApiClient) -> ExitCode {
    let base_url = client.base_url().as_str();
    match client.health_check().await {
        Ok(payload) => {
            println!("{}", render::health(HealthState::Online, base_url));
            println!("{}", render::json(&payload));
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{}", render::health(HealthState::Offline, base_url));
            eprintln!("Error: {}", err.message);
            ExitCode::FAILURE
        }
    }
}

async fn watch_health(
    client: &FashionApiClient,
    period: std::time::Duration,
    changes: Option<usize>,
) -> ExitCode {
    let base_url = client.base_url().to_string();
    let monitor = features::health_monitor(client, period);
    let mut rx = monitor.subscribe();
    println!("{}", render::health(*rx.borrow_and_update(), &base_url));

    let mut seen = 0usize;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", render::health(*rx.borrow_and_update(), &base_url));
                seen += 1;
                if changes.is_some_and(|limit| seen >= limit) {
                    break;
                }
            }
        }
    }

    let last = monitor.state();
    monitor.stop().await;
    if last == HealthState::Offline {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn confirm_retry(answers: &mut BufReader<Stdin>) -> bool {
    if !std::io::stdin().is_terminal() {
        return false;
    }
    eprint!("Try again? [y/N] ");
    let _ = std::io::stderr().flush();
    read_answer(answers).await
}

/// Read one line from a reader shared across prompts; EOF reads as "no".
async fn read_answer<R: AsyncBufRead + Unpin>(reader: &mut R) -> bool {
    let mut answer = String::new();
    match reader.read_line(&mut answer).await {
        Ok(_) => is_yes(&answer),
        Err(_) => false,
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn require_text(field: &'static str, value: String) -> Result<String, CliError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyInput(field));
    }
    Ok(trimmed.to_owned())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

async fn load_image(path: &Path) -> Result<StyleImage, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::ReadImage {
            path: path.to_path_buf(),
            source,
        })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_owned());

    Ok(StyleImage {
        content_type: content_type_for(path).to_owned(),
        file_name,
        bytes,
    })
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[tokio::test]
    async fn answers_typed_ahead_are_read_in_order() {
        let mut input = BufReader::new(&b"y\nyes\nn\n"[..]);
        assert!(read_answer(&mut input).await);
        assert!(read_answer(&mut input).await);
        assert!(!read_answer(&mut input).await);
        assert!(!read_answer(&mut input).await);
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn twin_requires_preferences_or_user() {
        assert!(Cli::try_parse_from(["fashion-cli", "twin"]).is_err());
        let cli = Cli::try_parse_from(["fashion-cli", "twin", "--user-id", "user_123"])
            .expect("user id form parses");
        assert!(matches!(
            cli.command,
            Command::Twin {
                user_id: Some(_),
                preferences: None
            }
        ));
    }

    #[test]
    fn unique_item_form_needs_user() {
        assert!(Cli::try_parse_from(["fashion-cli", "unique", "--item-id", "42"]).is_err());
        assert!(
            Cli::try_parse_from([
                "fashion-cli",
                "unique",
                "--item-id",
                "42",
                "--user-id",
                "user_123"
            ])
            .is_ok()
        );
    }

    #[test]
    fn blank_required_text_is_rejected() {
        assert!(matches!(
            require_text("query", "   ".to_owned()),
            Err(CliError::EmptyInput("query"))
        ));
        assert_eq!(
            require_text("query", " red dress ".to_owned()).expect("non-blank"),
            "red dress"
        );
        assert_eq!(optional_text(Some("  ".to_owned())), None);
    }

    #[test]
    fn retry_answer_parsing() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("nope"));
    }

    #[test]
    fn image_content_type_follows_extension() {
        assert_eq!(content_type_for(Path::new("look.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("look.webp")), "image/webp");
        assert_eq!(content_type_for(Path::new("look")), "application/octet-stream");
    }
}
