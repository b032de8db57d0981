//! 鉴权模块：token 签发与校验。

pub(crate) mod authorizer;
pub(crate) mod token;

pub(crate) use authorizer::{Authorizer, TokenGenerator, TokenValidator};
