//! axum 路由处理函数：收集 body 后交给 handler。

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{
    api::{reply::HandlerReply, request::HandlerRequest},
    state::AppState,
};

/// 请求 body 上限。
const MAX_BODY_BYTES: usize = 64 * 1024;

/// 登录接口。
pub(crate) async fn login_route(State(state): State<AppState>, request: Request) -> Response {
    let request = match collect_request(request).await {
        Ok(request) => request,
        Err(response) => return response,
    };
    reply_or_default(state.login.handle(&request).await)
}

/// 用户数据接口。
pub(crate) async fn users_route(State(state): State<AppState>, request: Request) -> Response {
    let request = match collect_request(request).await {
        Ok(request) => request,
        Err(response) => return response,
    };
    reply_or_default(state.data.handle(&request).await)
}

/// 读完 body，转换为 handler 入参。
async fn collect_request(request: Request) -> Result<HandlerRequest, Response> {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, MAX_BODY_BYTES).await.map_err(|err| {
        error!("read request body failed: {err}");
        HandlerReply::internal_error().into_response()
    })?;
    Ok(HandlerRequest {
        method: parts.method,
        uri: parts.uri,
        headers: parts.headers,
        body,
    })
}

/// handler 未写响应时交给传输层默认：405 空 body。
fn reply_or_default(reply: Option<HandlerReply>) -> Response {
    match reply {
        Some(reply) => reply.into_response(),
        None => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}
