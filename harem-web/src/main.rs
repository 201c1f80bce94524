//! Servidor web Axum para converter corpora HAREM em dados de treinamento

mod config;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use harem_core::{CategoryTable, CorpusParser, ParseError, Processor, Token};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::WebConfig;

/// Estado compartilhado da aplicação
struct AppState {
    processor: Processor,
}

#[derive(Deserialize)]
struct CorpusRequest {
    corpus: String,
}

#[derive(Serialize)]
struct ParseResponse {
    tokens: Vec<Token>,
    total_tokens: usize,
}

/// Falha estrutural do corpus enviada ao cliente como 422
struct ApiError(ParseError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("corpus rejeitado: {}", self.0);
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

/// A tarefa de parsing não terminou (pânico na thread bloqueante)
fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "falha interna" })),
    )
        .into_response()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = WebConfig::from_env();
    let processor = config.load_processor_config()?.build();
    info!(
        categories = processor.parser().categories().len(),
        "processador configurado"
    );
    for (code, label) in processor.parser().categories().sorted_entries() {
        debug!(code, label = %label, "categoria ativa");
    }
    let state = Arc::new(AppState { processor });

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!("🚀 Servidor HAREM iniciado em http://{}", config.addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/parse", post(parse_handler))
        .route("/process", post(process_handler))
        .route("/categories", get(categories_handler))
        .layer(cors)
        .with_state(state)
}

/// Corpus → tokens em JSON
async fn parse_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CorpusRequest>,
) -> Response {
    info!("parse: {} bytes", req.corpus.len());

    // Parsing é síncrono e pode ser longo em corpora completos
    let result = tokio::task::spawn_blocking(move || state.processor.parser().parse(&req.corpus)).await;

    match result {
        Ok(Ok(tokens)) => Json(ParseResponse {
            total_tokens: tokens.len(),
            tokens,
        })
        .into_response(),
        Ok(Err(err)) => ApiError(err).into_response(),
        Err(join_err) => {
            error!("tarefa de parsing falhou: {}", join_err);
            internal_error()
        }
    }
}

/// Corpus → TSV do Stanford NER
async fn process_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CorpusRequest>,
) -> Response {
    info!("process: {} bytes", req.corpus.len());

    let result = tokio::task::spawn_blocking(move || state.processor.process(&req.corpus)).await;

    match result {
        Ok(Ok(output)) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            output,
        )
            .into_response(),
        Ok(Err(err)) => ApiError(err).into_response(),
        Err(join_err) => {
            error!("tarefa de processamento falhou: {}", join_err);
            internal_error()
        }
    }
}

/// Tabela de categorias ativa
async fn categories_handler(State(state): State<Arc<AppState>>) -> Json<CategoryTable> {
    Json(state.processor.parser().categories().clone())
}
