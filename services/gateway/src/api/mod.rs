//! 与传输层无关的请求/响应模型。

pub(crate) mod reply;
pub(crate) mod request;
