//! Authorizer：凭证校验后签发 token，按 token 解析权限。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sg_protocol::{Account, AuthorizationResult, SessionToken};
use tracing::{debug, info};

use crate::{
    auth::token::issue_session_token,
    store::{CredentialStore, StoreError, TokenStore},
};

/// 当前时间来源。
pub(crate) type Clock = fn() -> DateTime<Utc>;

/// 登录侧：账号换 token。
#[async_trait]
pub(crate) trait TokenGenerator: Send + Sync {
    /// 凭证不匹配返回 `Ok(None)`；存储故障原样返回。
    async fn generate_token(
        &self,
        account: &Account,
    ) -> Result<Option<SessionToken>, StoreError>;
}

/// 请求侧：token 换权限。
#[async_trait]
pub(crate) trait TokenValidator: Send + Sync {
    /// 未找到/过期以结果状态表达，仅存储故障返回错误。
    async fn validate_token(&self, token_id: &str) -> Result<AuthorizationResult, StoreError>;
}

/// 会话鉴权器；除两个存储外无内部状态。
#[derive(Clone)]
pub(crate) struct Authorizer {
    credentials: Arc<dyn CredentialStore>,
    tokens: Arc<dyn TokenStore>,
    clock: Clock,
}

impl Authorizer {
    pub(crate) fn new(credentials: Arc<dyn CredentialStore>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            credentials,
            tokens,
            clock: Utc::now,
        }
    }

    /// 替换时间来源。
    #[cfg(test)]
    pub(crate) fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait]
impl TokenGenerator for Authorizer {
    async fn generate_token(
        &self,
        account: &Account,
    ) -> Result<Option<SessionToken>, StoreError> {
        let Some(credential) = self
            .credentials
            .get_credential(&account.username, &account.password)
            .await?
        else {
            debug!("credential mismatch for user {}", account.username);
            return Ok(None);
        };

        let token = issue_session_token(&credential, (self.clock)());
        // 未落盘的 token 无法通过校验，落盘失败即整体失败。
        self.tokens.store_token(&token).await?;
        info!(
            "session token issued: user={} token={}",
            token.user_name, token.token_id
        );
        Ok(Some(token))
    }
}

#[async_trait]
impl TokenValidator for Authorizer {
    async fn validate_token(&self, token_id: &str) -> Result<AuthorizationResult, StoreError> {
        let Some(token) = self.tokens.get_token(token_id).await? else {
            debug!("session token not found");
            return Ok(AuthorizationResult::invalid());
        };
        if token.is_expired_at((self.clock)()) {
            debug!("session token expired: user={}", token.user_name);
            return Ok(AuthorizationResult::expired());
        }
        Ok(AuthorizationResult::valid(token.access_rights))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use sg_protocol::{Account, AuthorizationResult, Credential, SessionToken, TokenState};

    use super::{Authorizer, TokenGenerator, TokenValidator};
    use crate::store::{CredentialStore, MemoryTokenStore, StoreError, TokenStore};

    fn epoch() -> DateTime<Utc> {
        Utc.timestamp_opt(0, 0).unwrap()
    }

    /// 固定返回值的凭证存储，记录调用次数。
    struct FakeCredentials {
        result: Result<Option<Credential>, StoreError>,
        calls: AtomicUsize,
    }

    impl FakeCredentials {
        fn returning(result: Result<Option<Credential>, StoreError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CredentialStore for FakeCredentials {
        async fn get_credential(
            &self,
            _username: &str,
            _password: &str,
        ) -> Result<Option<Credential>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    /// 所有操作都失败的 token 存储。
    struct BrokenTokens;

    #[async_trait]
    impl TokenStore for BrokenTokens {
        async fn store_token(&self, _token: &SessionToken) -> Result<(), StoreError> {
            Err(StoreError::Io("disk full".to_string()))
        }

        async fn get_token(&self, _token_id: &str) -> Result<Option<SessionToken>, StoreError> {
            Err(StoreError::Io("db down".to_string()))
        }
    }

    fn account() -> Account {
        Account {
            username: "someuser".to_string(),
            password: "pass".to_string(),
        }
    }

    fn someuser() -> Credential {
        Credential {
            username: "someuser".to_string(),
            access_rights: vec![1, 2, 3],
        }
    }

    fn token(id: &str, expiration_time: DateTime<Utc>) -> SessionToken {
        SessionToken {
            token_id: id.to_string(),
            user_name: "someuser".to_string(),
            access_rights: vec![1, 2, 3],
            valid: true,
            expiration_time,
        }
    }

    #[tokio::test]
    async fn valid_credentials_yield_persisted_one_hour_token() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let authorizer =
            Authorizer::new(FakeCredentials::returning(Ok(Some(someuser()))), tokens.clone())
                .with_clock(epoch);

        let token = authorizer
            .generate_token(&account())
            .await
            .expect("generate should succeed")
            .expect("token should be issued");

        assert_eq!(token.user_name, "someuser");
        assert_eq!(token.access_rights, vec![1, 2, 3]);
        assert!(token.valid);
        assert!(!token.token_id.is_empty());
        assert_eq!(token.expiration_time, epoch() + Duration::hours(1));
        assert_eq!(tokens.get_token(&token.token_id).await.unwrap(), Some(token));
    }

    #[tokio::test]
    async fn unknown_account_yields_none_and_stores_nothing() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let authorizer = Authorizer::new(FakeCredentials::returning(Ok(None)), tokens.clone());

        assert_eq!(authorizer.generate_token(&account()).await, Ok(None));
        assert_eq!(tokens.len().await, 0);
    }

    #[tokio::test]
    async fn credential_store_failure_is_passed_through() {
        let failure = StoreError::Io("error".to_string());
        let authorizer = Authorizer::new(
            FakeCredentials::returning(Err(failure.clone())),
            Arc::new(MemoryTokenStore::new()),
        );

        assert_eq!(authorizer.generate_token(&account()).await, Err(failure));
    }

    #[tokio::test]
    async fn token_persist_failure_fails_generation() {
        let authorizer =
            Authorizer::new(FakeCredentials::returning(Ok(Some(someuser()))), Arc::new(BrokenTokens));

        assert_eq!(
            authorizer.generate_token(&account()).await,
            Err(StoreError::Io("disk full".to_string()))
        );
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let authorizer = Authorizer::new(
            FakeCredentials::returning(Ok(None)),
            Arc::new(MemoryTokenStore::new()),
        );

        let result = authorizer.validate_token("st_missing").await.unwrap();
        assert_eq!(result, AuthorizationResult::invalid());
    }

    #[tokio::test]
    async fn expired_token_loses_its_rights() {
        let tokens = Arc::new(MemoryTokenStore::new());
        tokens.store_token(&token("st_old", epoch())).await.unwrap();
        tokens
            .store_token(&token("st_past", epoch() - Duration::seconds(1)))
            .await
            .unwrap();
        let authorizer =
            Authorizer::new(FakeCredentials::returning(Ok(None)), tokens).with_clock(epoch);

        for id in ["st_old", "st_past"] {
            let result = authorizer.validate_token(id).await.unwrap();
            assert_eq!(result.state, TokenState::Expired);
            assert!(result.access_rights.is_empty());
        }
    }

    #[tokio::test]
    async fn live_token_is_valid_and_reads_are_idempotent() {
        let tokens = Arc::new(MemoryTokenStore::new());
        tokens
            .store_token(&token("st_live", epoch() + Duration::seconds(1)))
            .await
            .unwrap();
        let authorizer =
            Authorizer::new(FakeCredentials::returning(Ok(None)), tokens).with_clock(epoch);

        let first = authorizer.validate_token("st_live").await.unwrap();
        let second = authorizer.validate_token("st_live").await.unwrap();
        assert_eq!(first, AuthorizationResult::valid(vec![1, 2, 3]));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn token_store_failure_is_passed_through_on_validate() {
        let authorizer =
            Authorizer::new(FakeCredentials::returning(Ok(None)), Arc::new(BrokenTokens));

        assert_eq!(
            authorizer.validate_token("st_any").await,
            Err(StoreError::Io("db down".to_string()))
        );
    }

    #[tokio::test]
    async fn issued_token_validates_until_clock_passes_expiry() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let credentials = FakeCredentials::returning(Ok(Some(someuser())));
        let minting = Authorizer::new(credentials.clone(), tokens.clone()).with_clock(epoch);
        let token = minting.generate_token(&account()).await.unwrap().unwrap();

        assert!(minting.validate_token(&token.token_id).await.unwrap().is_valid());

        fn after_expiry() -> DateTime<Utc> {
            Utc.timestamp_opt(3600, 0).unwrap()
        }
        let later = Authorizer::new(credentials.clone(), tokens).with_clock(after_expiry);
        assert_eq!(
            later.validate_token(&token.token_id).await.unwrap(),
            AuthorizationResult::expired()
        );
        assert_eq!(credentials.calls.load(Ordering::SeqCst), 1);
    }
}
