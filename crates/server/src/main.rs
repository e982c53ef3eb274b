//! # sheetblog-server
//!
//! Read-only JSON API over the posts of a spreadsheet-backed blog.
//!
//! Posts are fetched once at startup; a failed fetch serves an empty blog.

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sheetblog_core::{BlogError, Post, PostCollection, SiteConfig, DEFAULT_RELATED_LIMIT};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

/// Environment variable for the listen address.
const ENV_ADDR: &str = "SHEETBLOG_ADDR";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Everything the handlers read. Never mutated after startup.
#[derive(Debug, Default)]
pub struct AppState {
    pub posts: PostCollection,
    pub config: SiteConfig,
}

type SharedState = Arc<AppState>;

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
    /// Number of published records loaded.
    pub posts: usize,
}

/// `?page=N` on the list endpoint.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

/// A post with the derived data a detail view needs.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail<'a> {
    pub post: &'a Post,
    pub headings: Vec<String>,
    pub read_time_minutes: usize,
    pub related: Vec<&'a Post>,
}

/// Records carrying one label.
#[derive(Serialize)]
pub struct LabelPosts<'a> {
    pub label: &'a str,
    pub posts: Vec<&'a Post>,
}

/// JSON error body.
#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn not_found(err: BlogError) -> Response {
    let body = ErrorBody {
        error: err.to_string(),
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// Health check endpoint handler.
pub async fn health(State(state): State<SharedState>) -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        posts: state.posts.len(),
    })
}

/// One page of blog posts.
pub async fn list_posts(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Response {
    let page = state
        .posts
        .paginate(query.page.unwrap_or(1), state.config.posts_per_page);
    Json(page).into_response()
}

/// A post or page by slug, first match wins.
pub async fn show_post(State(state): State<SharedState>, Path(slug): Path<String>) -> Response {
    let Some(post) = state.posts.find_by_slug(&slug) else {
        return not_found(BlogError::NotFound(slug));
    };
    Json(PostDetail {
        post,
        headings: post.headings(),
        read_time_minutes: post.read_time_minutes(),
        related: state.posts.related(post, DEFAULT_RELATED_LIMIT),
    })
    .into_response()
}

/// Records carrying a label. An unknown label is an empty list, not an error.
pub async fn label_posts(State(state): State<SharedState>, Path(label): Path<String>) -> Response {
    Json(LabelPosts {
        label: &label,
        posts: state.posts.with_label(&label),
    })
    .into_response()
}

/// Static pages.
pub async fn list_pages(State(state): State<SharedState>) -> Response {
    Json(state.posts.pages()).into_response()
}

/// Create the application router.
///
/// This is separated from `main()` to allow testing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/health", get(health))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(show_post))
        .route("/api/labels/:label", get(label_posts))
        .route("/api/pages", get(list_pages))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SiteConfig::from_env()?;
    let posts = PostCollection::new(sheetblog_http::load_posts(&config).await);
    tracing::info!(posts = posts.len(), site = %config.site_name, "content loaded");

    let app = create_router(AppState { posts, config });

    let addr = std::env::var(ENV_ADDR).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    tracing::info!(%addr, "sheetblog-server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
