//! Admin API 鉴权中间件
//!
//! 基于静态 Bearer Token 的访问控制。admin_token 为空时视为 Admin API
//! 未启用，统一返回 404，不向探测者暴露端点的存在。

use actix_web::middleware::Next;
use actix_web::{
    Error, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
};
use subtle::ConstantTimeEq;
use tracing::{debug, info};

use crate::api::services::admin::ErrorCode;
use crate::config::get_config;

pub struct AuthMiddleware;

impl AuthMiddleware {
    /// 常量时间比较，防止时序攻击
    fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
        a.ct_eq(b).into()
    }

    /// Admin API 身份验证中间件
    pub async fn admin_auth(
        req: ServiceRequest,
        next: Next<BoxBody>,
    ) -> Result<ServiceResponse<BoxBody>, Error> {
        if req.method() == actix_web::http::Method::OPTIONS {
            // 对于 OPTIONS 请求，直接返回 204 No Content
            return Ok(req.into_response(HttpResponse::NoContent().finish()));
        }

        let config = get_config();
        let admin_token = &config.api.admin_token;

        // token 为空时认为 Admin API 被禁用
        if admin_token.is_empty() {
            return Ok(req.into_response(
                HttpResponse::NotFound()
                    .insert_header(("Content-Type", "text/html; charset=utf-8"))
                    .body("Not Found"),
            ));
        }

        // 检查 Authorization header
        if let Some(auth_header) = req.headers().get("Authorization")
            && let Some(token_bytes) = auth_header.as_bytes().strip_prefix(b"Bearer ")
            && Self::constant_time_compare(token_bytes, admin_token.as_bytes())
        {
            debug!("Admin API authentication succeeded");
            return next.call(req).await;
        }

        info!("Admin API authentication failed: token mismatch or missing Authorization header");
        Ok(req.into_response(
            HttpResponse::Unauthorized()
                .append_header(("Content-Type", "application/json; charset=utf-8"))
                .json(serde_json::json!({
                    "code": ErrorCode::Unauthorized as i32,
                    "data": { "error": "Unauthorized: Invalid or missing token" }
                })),
        ))
    }
}
