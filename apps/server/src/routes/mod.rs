// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP routes and middleware stack.

pub mod health;
pub mod mesh;

use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// CORS policy from the configured origins; "*" allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|origin| origin == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}

/// Build the application router with all middleware.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        // Root endpoint - API information
        .route("/", get(health::info))
        // Health check
        .route("/api/v1/health", get(health::check))
        // Mesh endpoints
        .route("/api/v1/mesh", post(mesh::generate))
        .route("/api/v1/mesh/batch", post(mesh::generate_batch))
        // Cache endpoints
        .route("/api/v1/cache/:key", get(mesh::get_cached))
        // Middleware
        .layer(DefaultBodyLimit::max(config.max_body_bytes()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::DiskCache;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_config(cache_dir: &str, cache_enabled: bool) -> Config {
        Config {
            port: 0,
            cache_dir: cache_dir.to_string(),
            cache_enabled,
            max_body_size_kb: 64,
            request_timeout_secs: 30,
            worker_threads: 2,
            max_batch_size: 2,
            cors_origins: vec!["*".to_string()],
        }
    }

    async fn test_app(cache_enabled: bool) -> (Router, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "psycad-routes-{}-{}",
            std::process::id(),
            cache_enabled
        ));
        let config = test_config(dir.to_str().unwrap(), cache_enabled);
        (app_with_config(config).await, dir)
    }

    async fn app_with_config(config: Config) -> Router {
        let cache = DiskCache::new(&config.cache_dir, config.cache_enabled).await;
        let state = AppState {
            cache: Arc::new(cache),
            config: Arc::new(config),
        };
        app(state)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app(false).await;
        let request = Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["cache_enabled"], false);
    }

    #[tokio::test]
    async fn test_generate_cube() {
        let (app, _) = test_app(false).await;
        let shape = json!({
            "shape": "cube",
            "parameters": {"width": 2, "height": 2, "depth": 2},
            "material": {"color": "#ff0000", "metalness": 0, "roughness": 1}
        });
        let (status, body) = send(app, post_json("/api/v1/mesh", &shape.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["vertex_count"], 24);
        assert_eq!(body["stats"]["triangle_count"], 12);
        assert_eq!(body["stats"]["from_cache"], false);
        assert_eq!(body["mesh"]["vertices"].as_array().unwrap().len(), 72);
        assert_eq!(body["material"]["rgba"], json!([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(body["cache_key"].as_str().unwrap().len(), 64);
    }

    #[tokio::test]
    async fn test_fillet_reports_notice() {
        let (app, _) = test_app(false).await;
        let shape = json!({
            "shape": "cube",
            "operations": [{"type": "fillet", "operation": "edge", "parameters": {"radius": 0.1}}]
        });
        let (status, body) = send(app, post_json("/api/v1/mesh", &shape.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["notices"], json!([{"kind": "not_implemented", "index": 0, "feature": "fillet"}]));
    }

    #[tokio::test]
    async fn test_error_codes() {
        let (app, _) = test_app(false).await;

        let (status, body) = send(app.clone(), post_json("/api/v1/mesh", r#"{"shape":"torus"}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "UNSUPPORTED_SHAPE");

        let (status, body) = send(
            app.clone(),
            post_json("/api/v1/mesh", r#"{"shape":"sphere","parameters":{"radius":-1}}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "INVALID_PARAMETER");

        let (status, body) = send(app, post_json("/api/v1/mesh", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn test_oversized_body_returns_413() {
        let dir = std::env::temp_dir().join(format!("psycad-routes-{}-limit", std::process::id()));
        let mut config = test_config(dir.to_str().unwrap(), false);
        config.max_body_size_kb = 1;
        let app = app_with_config(config).await;

        let shape = json!({
            "shape": "cube",
            "material": {"color": "#".repeat(4096)}
        });
        let (status, body) = send(app, post_json("/api/v1/mesh", &shape.to_string())).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], "BODY_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_bad_query_string_returns_json_error() {
        let (app, _) = test_app(false).await;
        let (status, body) = send(
            app,
            post_json("/api/v1/mesh?skip_cache=maybe", r#"{"shape":"cube"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_QUERY");
        assert!(body["error"].as_str().unwrap().starts_with("Invalid query string"));
    }

    #[tokio::test]
    async fn test_batch_limit_and_partial_failure() {
        let (app, _) = test_app(false).await;

        let (status, body) = send(
            app.clone(),
            post_json("/api/v1/mesh/batch", r#"{"shapes":[{"shape":"cone"},{"shape":"torus"}]}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["succeeded"], 1);
        assert_eq!(body["stats"]["failed"], 1);
        assert_eq!(body["results"][0]["status"], "ok");
        assert_eq!(body["results"][1]["status"], "error");
        assert_eq!(body["results"][1]["code"], "UNSUPPORTED_SHAPE");

        let (status, body) = send(
            app,
            post_json(
                "/api/v1/mesh/batch",
                r#"{"shapes":[{"shape":"cube"},{"shape":"cube"},{"shape":"cube"}]}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], "BATCH_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_cached_result_is_served() {
        let (app, dir) = test_app(true).await;
        let (status, body) = send(app.clone(), post_json("/api/v1/mesh", r#"{"shape":"sphere"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        let key = body["cache_key"].as_str().unwrap().to_string();

        // The write happens in the background; poll until it lands
        let mut cached = None;
        for _ in 0..50 {
            let request = Request::builder()
                .uri(format!("/api/v1/cache/{}", key))
                .body(Body::empty())
                .unwrap();
            let (status, body) = send(app.clone(), request).await;
            if status == StatusCode::OK {
                cached = Some(body);
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        let cached = cached.expect("cached result never appeared");
        assert_eq!(cached["stats"]["from_cache"], true);
        assert_eq!(cached["mesh"], body["mesh"]);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_unknown_cache_key() {
        let (app, _) = test_app(false).await;
        let request = Request::builder()
            .uri("/api/v1/cache/deadbeef")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
