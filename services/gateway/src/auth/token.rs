//! 会话 token 构造。

use chrono::{DateTime, Utc};
use sg_protocol::{Credential, SessionToken, session_token_ttl};
use uuid::Uuid;

/// 生成 token 标识：随机 UUID + 签发毫秒时间戳。
pub(crate) fn new_token_id(now: DateTime<Utc>) -> String {
    format!(
        "st_{}{:x}",
        Uuid::new_v4().simple(),
        now.timestamp_millis().max(0)
    )
}

/// 按凭证签发会话 token，有效期固定。
pub(crate) fn issue_session_token(credential: &Credential, now: DateTime<Utc>) -> SessionToken {
    SessionToken {
        token_id: new_token_id(now),
        user_name: credential.username.clone(),
        access_rights: credential.access_rights.clone(),
        valid: true,
        expiration_time: now + session_token_ttl(),
    }
}
