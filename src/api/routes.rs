use axum::{
    routing::{get, post},
    Router,
    extract::{ConnectInfo, Json, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::ServeDir;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};
use url::Url;

use crate::api::models::{ArticleRequest, ArticleResponse};
use crate::api::response;
use crate::extract::{extract_article, fallback};
use crate::{AppState, RateWindow};

const HANDLER_TIMEOUT: Duration = Duration::from_secs(60);
const RATE_WINDOW: Duration = Duration::from_secs(60);

pub fn create_router(app_state: AppState) -> Router {
    let static_dir = app_state.config.static_dir.clone();

    Router::new()
        .route("/api/article", post(article_handler))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            rate_limit,
        ))
        .route("/api/health", get(health_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn article_handler(Json(req): Json<ArticleRequest>) -> impl IntoResponse {
    println!("Processing article request for URL: {}", req.url);
    let start_time = Instant::now();

    if let Err(msg) = validate_url(&req.url) {
        println!("Rejected URL {}: {}", req.url, msg);
        return response::error::<ArticleResponse>(StatusCode::BAD_REQUEST, msg);
    }

    // The pipeline never fails; even a wedged fetch resolves to fallback
    // content so the editor always has something to render.
    let outcome = match tokio::time::timeout(HANDLER_TIMEOUT, extract_article(&req.url)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            println!("Request timed out after {:?}", start_time.elapsed());
            fallback::error_outcome(&req.url, "处理超时，请稍后重试")
        }
    };

    println!("Request processing took: {:?}", start_time.elapsed());
    response::success(ArticleResponse::from_outcome(req.url, outcome))
}

async fn health_handler() -> impl IntoResponse {
    response::success(serde_json::json!({ "status": "ok" }))
}

/// Boundary validation: the pipeline only ever sees public WeChat article
/// URLs.
fn validate_url(raw: &str) -> Result<(), String> {
    let parsed = Url::parse(raw).map_err(|e| format!("无效的链接: {}", e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("链接必须使用 http 或 https 协议".to_string());
    }
    if parsed.host_str() != Some("mp.weixin.qq.com") {
        return Err("仅支持微信公众号文章链接（mp.weixin.qq.com）".to_string());
    }
    if !parsed.path().starts_with("/s") {
        return Err("链接不是公众号文章地址".to_string());
    }
    Ok(())
}

/// Fixed-window per-IP limiter over shared state.
async fn rate_limit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let ip = addr.ip();
    let allowed = {
        let mut limits = state.rate_limits.lock().unwrap();
        note_request(
            &mut limits,
            ip,
            state.config.rate_limit_per_minute,
            RATE_WINDOW,
        )
    };

    if !allowed {
        println!("Rate limit exceeded for {}", ip);
        return response::error::<ArticleResponse>(
            StatusCode::TOO_MANY_REQUESTS,
            "请求过于频繁，请稍后重试".to_string(),
        )
        .into_response();
    }
    next.run(request).await
}

/// Counts one request against the client's window. Expired windows are swept
/// first, so entries for clients that never return do not accumulate.
fn note_request(
    limits: &mut HashMap<IpAddr, RateWindow>,
    ip: IpAddr,
    limit: u32,
    window: Duration,
) -> bool {
    limits.retain(|_, w| w.window_start.elapsed() < window);
    let entry = limits.entry(ip).or_insert_with(|| RateWindow {
        count: 0,
        window_start: Instant::now(),
    });
    entry.count += 1;
    entry.count <= limit
}
