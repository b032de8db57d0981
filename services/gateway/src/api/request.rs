//! handler 入参。

use axum::{
    body::Bytes,
    http::{HeaderMap, Method, Uri, header::AUTHORIZATION},
};

/// 已读完 body 的请求快照。
#[derive(Debug, Clone)]
pub(crate) struct HandlerRequest {
    pub(crate) method: Method,
    pub(crate) uri: Uri,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
}

impl HandlerRequest {
    #[cfg(test)]
    pub(crate) fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// `authorization` 头（即 token id）；缺失或非法编码时为空串。
    pub(crate) fn authorization(&self) -> &str {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .unwrap_or_default()
    }
}
