//! 请求处理：按 HTTP 方法分发，鉴权关卡在业务逻辑之前。

mod data;
mod http;
mod login;

use std::collections::HashMap;

use anyhow::Context;
use axum::http::Uri;
use sg_protocol::Account;

use crate::api::request::HandlerRequest;

pub(crate) use data::DataHandler;
pub(crate) use http::{login_route, users_route};
pub(crate) use login::LoginHandler;

/// 从请求 body 读取登录账号。
pub(crate) trait AccountReader: Send + Sync {
    fn read_account(&self, request: &HandlerRequest) -> anyhow::Result<Account>;
}

/// 解析 URL query 参数。
pub(crate) trait QueryParser: Send + Sync {
    fn parse_query(&self, uri: &Uri) -> HashMap<String, String>;
}

/// JSON body 读取。
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct JsonAccountReader;

impl AccountReader for JsonAccountReader {
    fn read_account(&self, request: &HandlerRequest) -> anyhow::Result<Account> {
        serde_json::from_slice(&request.body).context("decode login body")
    }
}

/// `application/x-www-form-urlencoded` 风格 query 解析，重复 key 取最后一个。
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct UrlQueryParser;

impl QueryParser for UrlQueryParser {
    fn parse_query(&self, uri: &Uri) -> HashMap<String, String> {
        let query = uri.query().unwrap_or_default();
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }
}
