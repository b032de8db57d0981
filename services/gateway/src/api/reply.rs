//! handler 出参与 axum 响应转换。

use axum::{
    body::Body,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Serialize;

const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// handler 写出的响应。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HandlerReply {
    pub(crate) status: StatusCode,
    pub(crate) content_type: Option<&'static str>,
    pub(crate) body: Option<String>,
}

impl HandlerReply {
    /// 仅状态码，无 body。
    pub(crate) fn empty(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: None,
        }
    }

    /// 纯文本提示。
    pub(crate) fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some(CONTENT_TYPE_TEXT),
            body: Some(message.into()),
        }
    }

    /// JSON 序列化 body。
    pub(crate) fn json<T: Serialize>(status: StatusCode, value: &T) -> serde_json::Result<Self> {
        Ok(Self {
            status,
            content_type: Some(CONTENT_TYPE_JSON),
            body: Some(serde_json::to_string(value)?),
        })
    }

    pub(crate) fn internal_error() -> Self {
        Self::empty(StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[cfg(test)]
    pub(crate) fn is_json(&self) -> bool {
        self.content_type == Some(CONTENT_TYPE_JSON)
    }
}

impl IntoResponse for HandlerReply {
    fn into_response(self) -> Response {
        let body = Body::from(self.body.unwrap_or_default());
        match self.content_type {
            Some(content_type) => (self.status, [(CONTENT_TYPE, content_type)], body).into_response(),
            None => (self.status, body).into_response(),
        }
    }
}
