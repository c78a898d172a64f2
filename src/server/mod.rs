//! HTTP server: renders pages per request and accepts form posts

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cms::ContentClient;
use crate::config::FormsConfig;
use crate::content::POST_ROUTE;
use crate::forms::{self, ContactForm, SubmitGuard, SubscriptionForm};
use crate::generator::{fetch_post_list, FormViews, Generator, HomeContent, HomeQuery};
use crate::Site;

/// Server state shared by all handlers
pub struct AppState {
    generator: Generator,
    client: Arc<dyn ContentClient>,
    forms: FormsConfig,
    contact_guard: SubmitGuard,
    subscription_guard: SubmitGuard,
}

impl AppState {
    pub fn new(site: &Site, client: Arc<dyn ContentClient>) -> Result<Self> {
        Ok(Self {
            generator: Generator::new(site)?,
            client,
            forms: site.config.forms.clone(),
            contact_guard: SubmitGuard::new(),
            subscription_guard: SubmitGuard::new(),
        })
    }
}

/// Build the application router
pub fn router(site: &Site, state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route(&format!("{}/:custom_id", POST_ROUTE), get(post_handler))
        .route("/contact", post(contact_handler))
        .route("/subscribe", post(subscribe_handler))
        .nest_service("/static", ServeDir::new(&site.source_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, client: Arc<dyn ContentClient>, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(site, client)?);
    let app = router(site, state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HomeQuery>,
) -> Response {
    let content = HomeContent::fetch(state.client.as_ref()).await;
    page(state.generator.render_home(&content, &query, &FormViews::default()))
}

async fn post_handler(
    State(state): State<Arc<AppState>>,
    Path(custom_id): Path<String>,
) -> Response {
    tracing::debug!("Post page requested: {}", custom_id);
    let posts = fetch_post_list(state.client.as_ref()).await;
    page(state.generator.render_post(posts.as_deref(), &custom_id))
}

async fn contact_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ContactForm>,
) -> Response {
    let submission = forms::submit(
        state.client.as_ref(),
        &state.contact_guard,
        form,
        &state.forms,
    )
    .await;

    let views = FormViews {
        contact: submission,
        ..FormViews::default()
    };
    let content = HomeContent::fetch(state.client.as_ref()).await;
    page(state.generator.render_home(&content, &HomeQuery::default(), &views))
}

async fn subscribe_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SubscriptionForm>,
) -> Response {
    let submission = forms::submit(
        state.client.as_ref(),
        &state.subscription_guard,
        form,
        &state.forms,
    )
    .await;

    let views = FormViews {
        subscription: submission,
        ..FormViews::default()
    };
    let content = HomeContent::fetch(state.client.as_ref()).await;
    page(state.generator.render_home(&content, &HomeQuery::default(), &views))
}

fn page(rendered: Result<String>) -> Response {
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Error rendering page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
