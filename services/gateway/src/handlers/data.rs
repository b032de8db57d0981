//! 数据接口：鉴权后按名字查询用户。

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use sg_protocol::{MSG_MISSING_NAME, MSG_UNAUTHORIZED};
use tracing::{debug, error};

use super::QueryParser;
use crate::{
    api::{reply::HandlerReply, request::HandlerRequest},
    auth::TokenValidator,
    store::UserDirectory,
};

/// 用户数据 handler。
#[derive(Clone)]
pub(crate) struct DataHandler {
    validator: Arc<dyn TokenValidator>,
    query: Arc<dyn QueryParser>,
    users: Arc<dyn UserDirectory>,
}

impl DataHandler {
    pub(crate) fn new(
        validator: Arc<dyn TokenValidator>,
        query: Arc<dyn QueryParser>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            validator,
            query,
            users,
        }
    }

    /// 按方法分发；返回 `None` 表示不写响应。
    pub(crate) async fn handle(&self, request: &HandlerRequest) -> Option<HandlerReply> {
        match request.method {
            Method::OPTIONS => Some(HandlerReply::empty(StatusCode::OK)),
            Method::GET => Some(self.handle_get(request).await),
            ref other => {
                debug!("data: unhandled method {other}");
                None
            }
        }
    }

    async fn handle_get(&self, request: &HandlerRequest) -> HandlerReply {
        match self.get_users(request).await {
            Ok(reply) => reply,
            Err(err) => {
                error!("data request failed: {err:#}");
                HandlerReply::internal_error()
            }
        }
    }

    async fn get_users(&self, request: &HandlerRequest) -> anyhow::Result<HandlerReply> {
        if !self.operation_authorized(request).await? {
            return Ok(HandlerReply::message(
                StatusCode::UNAUTHORIZED,
                MSG_UNAUTHORIZED,
            ));
        }

        let query = self.query.parse_query(&request.uri);
        let Some(name) = query.get("name").filter(|name| !name.is_empty()) else {
            return Ok(HandlerReply::message(
                StatusCode::BAD_REQUEST,
                MSG_MISSING_NAME,
            ));
        };

        let users = self.users.users_by_name(name).await?;
        Ok(HandlerReply::json(StatusCode::OK, &users)?)
    }

    /// 鉴权关卡：空 token 不查存储，非 VALID 一律拒绝。
    async fn operation_authorized(&self, request: &HandlerRequest) -> anyhow::Result<bool> {
        let token_id = request.authorization();
        if token_id.is_empty() {
            return Ok(false);
        }
        let result = self.validator.validate_token(token_id).await?;
        debug!("token state {:?}", result.state);
        Ok(result.is_valid())
    }
}
