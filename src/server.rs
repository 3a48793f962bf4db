// src/server.rs
// =============================================================================
// HTTP API for running analyses on demand.
//
//   GET  /health   -> liveness check
//   POST /analyze  -> body is an AnalysisConfig (camelCase JSON),
//                     response is the full Report
//
// Each request runs its own crawl; nothing is shared between requests.
// =============================================================================

use crate::config::AnalysisConfig;
use crate::crawl::run_analysis;
use crate::error::ConfigError;
use crate::report::{timestamp, Report};
use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    message: &'static str,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
}

/// Binds `bind` and serves until the process is stopped
pub async fn serve(bind: &str) -> Result<()> {
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address {}", bind))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    log::info!("heading-scout API listening on http://{}", addr);
    axum::serve(listener, router())
        .await
        .context("server shutdown")?;
    Ok(())
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "OK",
        message: "Headings API is running",
        timestamp: timestamp(),
    })
}

async fn analyze(Json(config): Json<AnalysisConfig>) -> Result<Json<Report>, ApiError> {
    // Reject bad input up front so clients get a 400, not a 500
    if let Err(e) = config.validate() {
        return Err(bad_request(&e));
    }

    match run_analysis(&config).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => match e.downcast_ref::<ConfigError>() {
            Some(config_error) => Err(bad_request(config_error)),
            None => Err(internal_error(e)),
        },
    }
}

fn bad_request(error: &ConfigError) -> ApiError {
    let message = match error {
        ConfigError::MissingStartUrl => {
            "Please provide a valid startUrl in the request body".to_string()
        }
        other => other.to_string(),
    };
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: error.to_string(),
            message,
        }),
    )
}

fn internal_error(err: anyhow::Error) -> ApiError {
    log::error!("Analysis failed: {:#}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Analysis failed".to_string(),
            message: format!("{:#}", err),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body.status, "OK");
        assert!(!body.timestamp.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_without_start_url_is_bad_request() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"maxPages": 3}"#).unwrap();
        let (status, Json(body)) = analyze(Json(config)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "startUrl is required");
    }

    #[tokio::test]
    async fn test_analyze_with_invalid_start_url_is_bad_request() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"startUrl": "definitely not a url"}"#).unwrap();
        let (status, _) = analyze(Json(config)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_router_builds() {
        let _ = router();
    }
}
