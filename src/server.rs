//! Web delivery layer: the form page, static assets, and the reading API.

use crate::app::App;
use crate::models::{ErrorResponse, ReadingRequest, ReadingResponse};
use crate::reading::{DEFAULT_CARD_COUNT, MAX_CARDS, MIN_CARDS};
use crate::{Error, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use minijinja::{context, path_loader, Environment};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

// Shared application state
#[derive(Clone)]
struct AppState {
    app: Arc<App>,
    templates: Arc<Environment<'static>>,
}

fn create_template_env() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_loader(path_loader("templates"));
    env
}

fn build_router(app: App) -> Router {
    let state = AppState {
        app: Arc::new(app),
        templates: Arc::new(create_template_env()),
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/reading", post(reading_handler))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `bind_addr` and serve until the process is stopped.
pub async fn serve(app: App, bind_addr: &str) -> Result<()> {
    let router = build_router(app);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}

async fn index_handler(State(state): State<AppState>) -> Response {
    let rendered = state
        .templates
        .get_template("index.html")
        .and_then(|tmpl| {
            tmpl.render(context! {
                title => "Tarot Reading",
                min_cards => MIN_CARDS,
                max_cards => MAX_CARDS,
                default_card_count => DEFAULT_CARD_COUNT,
            })
        });

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render index template: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("Internal Server Error".to_string()),
            )
                .into_response()
        }
    }
}

async fn reading_handler(
    State(state): State<AppState>,
    Json(request): Json<ReadingRequest>,
) -> Response {
    match state.app.perform_reading(request).await {
        Ok(reading) => Json(ReadingResponse { reading }).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: Error) -> Response {
    let (status, message) = match &err {
        Error::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message.clone()),
        Error::AiProvider(message) => (StatusCode::BAD_GATEWAY, message.clone()),
        _ => {
            error!("Unexpected error handling reading request: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };

    (status, Json(ErrorResponse { error: message })).into_response()
}
