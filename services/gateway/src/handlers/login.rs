//! 登录接口：账号换会话 token。

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use sg_protocol::MSG_WRONG_CREDENTIALS;
use tracing::{debug, error};

use super::AccountReader;
use crate::{
    api::{reply::HandlerReply, request::HandlerRequest},
    auth::TokenGenerator,
};

/// 登录 handler。
#[derive(Clone)]
pub(crate) struct LoginHandler {
    generator: Arc<dyn TokenGenerator>,
    reader: Arc<dyn AccountReader>,
}

impl LoginHandler {
    pub(crate) fn new(generator: Arc<dyn TokenGenerator>, reader: Arc<dyn AccountReader>) -> Self {
        Self { generator, reader }
    }

    /// 按方法分发；返回 `None` 表示不写响应。
    pub(crate) async fn handle(&self, request: &HandlerRequest) -> Option<HandlerReply> {
        match request.method {
            Method::OPTIONS => Some(HandlerReply::empty(StatusCode::OK)),
            Method::POST => Some(self.handle_post(request).await),
            ref other => {
                debug!("login: unhandled method {other}");
                None
            }
        }
    }

    async fn handle_post(&self, request: &HandlerRequest) -> HandlerReply {
        match self.login(request).await {
            Ok(reply) => reply,
            Err(err) => {
                error!("login failed: {err:#}");
                HandlerReply::internal_error()
            }
        }
    }

    async fn login(&self, request: &HandlerRequest) -> anyhow::Result<HandlerReply> {
        let account = self.reader.read_account(request)?;
        match self.generator.generate_token(&account).await? {
            Some(token) => Ok(HandlerReply::json(StatusCode::CREATED, &token)?),
            None => Ok(HandlerReply::message(
                StatusCode::NOT_FOUND,
                MSG_WRONG_CREDENTIALS,
            )),
        }
    }
}
