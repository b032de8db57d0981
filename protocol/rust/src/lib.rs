// 文件职责：
// 1) 定义 gateway 与客户端共用的会话鉴权数据结构。
// 2) 固定 token 生命周期与对外响应文案，保证各端一致。
// 3) 作为 Rust 侧数据模型唯一代码源，供其他服务复用。

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 会话 token 固定有效期（秒）。
pub const SESSION_TOKEN_TTL_SEC: i64 = 60 * 60;

/// 登录失败文案。
pub const MSG_WRONG_CREDENTIALS: &str = "wrong username or password";
/// 鉴权失败文案（缺失、无效、过期统一）。
pub const MSG_UNAUTHORIZED: &str = "Unauthorized operation!";
/// 用户查询缺少 name 参数文案。
pub const MSG_MISSING_NAME: &str = "Missing name parameter in the request!";

/// 会话 token 有效期。
pub fn session_token_ttl() -> Duration {
    Duration::seconds(SESSION_TOKEN_TTL_SEC)
}

/// 登录请求携带的账号（仅请求期内存在，不落盘）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    // 用户名；兼容旧客户端的 `userName` 字段。
    #[serde(alias = "userName")]
    pub username: String,
    // 明文密码，只交给凭证存储校验。
    pub password: String,
}

/// 凭证存储返回的用户凭证。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub username: String,
    // 有序权限码列表。
    pub access_rights: Vec<i32>,
}

/// 会话 token：登录成功后签发，签发后只读。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    // 不透明 token 标识。
    pub token_id: String,
    // 绑定的用户名。
    pub user_name: String,
    // 从凭证拷贝的权限码。
    pub access_rights: Vec<i32>,
    // 签发时恒为 true。
    pub valid: bool,
    // 过期时间（RFC3339）。
    pub expiration_time: DateTime<Utc>,
}

impl SessionToken {
    /// 判断在 `now` 时刻是否已过期（到点即过期）。
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time <= now
    }
}

/// token 查询结果状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenState {
    Valid,
    Expired,
    Invalid,
}

/// 面向 handler 的鉴权结果，每次请求现算，不存储。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationResult {
    pub access_rights: Vec<i32>,
    pub state: TokenState,
}

impl AuthorizationResult {
    /// 有效 token：携带权限码。
    pub fn valid(access_rights: Vec<i32>) -> Self {
        Self {
            access_rights,
            state: TokenState::Valid,
        }
    }

    /// 已过期：权限码清空。
    pub fn expired() -> Self {
        Self {
            access_rights: Vec::new(),
            state: TokenState::Expired,
        }
    }

    /// 未找到。
    pub fn invalid() -> Self {
        Self {
            access_rights: Vec::new(),
            state: TokenState::Invalid,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.state == TokenState::Valid
    }
}

/// 职级，线上以整数编码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WorkingPosition {
    Junior,
    Programmer,
    Engineer,
    Expert,
    Manager,
}

impl TryFrom<u8> for WorkingPosition {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Junior),
            1 => Ok(Self::Programmer),
            2 => Ok(Self::Engineer),
            3 => Ok(Self::Expert),
            4 => Ok(Self::Manager),
            other => Err(format!("unknown working position: {other}")),
        }
    }
}

impl From<WorkingPosition> for u8 {
    fn from(value: WorkingPosition) -> Self {
        match value {
            WorkingPosition::Junior => 0,
            WorkingPosition::Programmer => 1,
            WorkingPosition::Engineer => 2,
            WorkingPosition::Expert => 3,
            WorkingPosition::Manager => 4,
        }
    }
}

/// 用户记录（数据接口返回）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub email: String,
    pub working_position: WorkingPosition,
}
