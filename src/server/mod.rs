//! HTTP server exposing the blog pages

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tera::Context;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{ContentLoader, MarkdownRenderer, PostCollection};
use crate::error::Error;
use crate::templates::{page_context, PostData, TemplateRenderer};
use crate::Blog;

/// Everything a request handler reads; immutable once built
pub struct AppState {
    config: SiteConfig,
    posts: PostCollection,
    renderer: TemplateRenderer,
    about_html: String,
}

impl AppState {
    /// Build server state from an already loaded collection
    pub fn new(config: SiteConfig, posts: PostCollection) -> crate::error::Result<Self> {
        let about_html = if config.about.trim().is_empty() {
            String::new()
        } else {
            MarkdownRenderer::with_options(&config.highlight).render(&config.about)
        };

        Ok(Self {
            renderer: TemplateRenderer::new()?,
            config,
            posts,
            about_html,
        })
    }

    /// Load the posts file and build server state
    pub fn load(blog: &Blog) -> crate::error::Result<Self> {
        let posts = ContentLoader::new(blog).load()?;
        Self::new(blog.config.clone(), posts)
    }

    fn context(&self) -> Context {
        page_context(&self.config, &self.posts)
    }

    fn render(&self, template_name: &str, context: &Context) -> Result<Html<String>, PageError> {
        self.renderer
            .render(template_name, context)
            .map(Html)
            .map_err(|e| self.error_page(e))
    }

    /// Render an error as a page with the matching status
    fn error_page(&self, err: Error) -> PageError {
        let (status, message) = if err.is_not_found() {
            tracing::debug!("Not found: {}", err);
            (StatusCode::NOT_FOUND, err.to_string())
        } else {
            tracing::error!("Request failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong.".to_string(),
            )
        };

        self.status_page(status, &message)
    }

    fn status_page(&self, status: StatusCode, message: &str) -> PageError {
        let mut context = self.context();
        context.insert("status", &status.as_u16());
        context.insert("message", message);

        let body = self
            .renderer
            .render("error.html", &context)
            .unwrap_or_else(|_| status.to_string());

        PageError { status, body }
    }
}

/// An error response with a rendered body
pub struct PageError {
    status: StatusCode,
    body: String,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status, Html(self.body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// Build the router for all blog pages
pub fn router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/", get(index_handler))
        .route("/tags/:tag", get(tag_handler))
        .route("/posts/:slug", get(post_handler))
        .route("/about", get(about_handler));

    let root = state.config.root.trim_end_matches('/').to_string();
    let app = if root.is_empty() {
        routes
    } else {
        Router::new().nest(&root, routes)
    };

    app.fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the blog server
///
/// Posts are loaded before binding; a missing or malformed posts file
/// aborts startup.
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::load(blog)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, PageError> {
    let query = params.q.unwrap_or_default().trim().to_string();
    let posts = state.posts.search(&query);

    let mut context = state.context();
    context.insert("posts", &PostData::list(&state.config, posts));
    context.insert("query", &query);
    state.render("index.html", &context)
}

async fn tag_handler(
    State(state): State<Arc<AppState>>,
    Path(tag): Path<String>,
) -> Result<Html<String>, PageError> {
    let posts = state.posts.by_tag(&tag).map_err(|e| state.error_page(e))?;

    let mut context = state.context();
    context.insert("posts", &PostData::list(&state.config, posts));
    context.insert("tag", &tag);
    state.render("tag.html", &context)
}

async fn post_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let post = state.posts.by_slug(&slug).map_err(|e| state.error_page(e))?;
    let prev_post = state.posts.prev(&slug).map(|p| PostData::new(&state.config, p));
    let next_post = state.posts.next(&slug).map(|p| PostData::new(&state.config, p));

    let mut context = state.context();
    context.insert("post", &PostData::new(&state.config, post));
    context.insert("prev_post", &prev_post);
    context.insert("next_post", &next_post);
    state.render("post.html", &context)
}

async fn about_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let mut context = state.context();
    context.insert("about", &state.about_html);
    state.render("about.html", &context)
}

async fn fallback_handler(State(state): State<Arc<AppState>>) -> PageError {
    state.status_page(StatusCode::NOT_FOUND, "Page not found")
}
