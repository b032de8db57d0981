//! Gateway 应用装配：路由、CORS 与监听。

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{any, get},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::{
    config::GatewayConfig,
    handlers::{login_route, users_route},
    state::AppState,
};

/// Gateway 入口：装配依赖并启动 HTTP 服务。
pub(crate) async fn run(config: GatewayConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config).await?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!("sessiongate listening on {}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// 构造路由；方法分发交给各 handler。
pub(crate) fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/login", any(login_route))
        .route("/users", any(users_route))
        .layer(cors)
        .with_state(state)
}

/// 健康检查接口。
async fn healthz() -> &'static str {
    "ok"
}
