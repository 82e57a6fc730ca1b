//! HTTP 层
//!
//! - `services`: 公开 Love API、健康检查与 Admin API
//! - `middleware`: 请求 ID 注入与 Admin 鉴权

pub mod middleware;
pub mod services;
