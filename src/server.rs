//! 入站 HTTP 入口
//!
//! - `POST /webhook`：校验 `X-Webhook-Secret`，解析事件，跑中继流程
//! - `GET /health`：健康检查
//!
//! 只要密钥和 JSON 都合法就返回 200，中继失败只记日志，
//! 避免上游因为下游问题重复投递。

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::RelayConfig;
use crate::event::RepoEvent;
use crate::relay::{Relay, RelayOutcome};

/// 密钥请求头
pub const SECRET_HEADER: &str = "x-webhook-secret";

/// 服务共享状态（只读）
pub struct AppState {
    relay: Relay,
    secret: String,
}

impl AppState {
    pub fn new(relay: Relay, secret: impl Into<String>) -> Self {
        Self {
            relay,
            secret: secret.into(),
        }
    }
}

/// 构建路由
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/webhook", post(receive_webhook))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// 启动 HTTP 服务，直到进程退出
pub async fn serve(config: &RelayConfig, relay: Relay) -> anyhow::Result<()> {
    let secret = config.require_secret()?.to_string();
    let app = router(Arc::new(AppState::new(relay, secret)));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "hub-relay listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// 常量时间比较，避免按前缀泄露密钥
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let provided = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
    let authorized = provided.is_some_and(|p| constant_time_eq(p, &state.secret));
    if !authorized {
        warn!("Rejected webhook with missing or wrong secret");
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "invalid secret" })))
            .into_response();
    }

    let event: RepoEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "Rejected webhook with invalid payload");
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": "invalid payload" })))
                .into_response();
        }
    };

    match state.relay.handle(&event).await {
        Ok(RelayOutcome::Delivered) => info!(repo = %event.repo.name, "Webhook relayed"),
        Ok(RelayOutcome::Skipped(reason)) => {
            info!(repo = %event.repo.name, reason = %reason, "Webhook acknowledged without relay")
        }
        Err(e) => error!(repo = %event.repo.name, error = %e, "Relay failed"),
    }

    (StatusCode::OK, Json(json!({ "ok": true }))).into_response()
}
