//! 公开 Love API
//!
//! 匿名互动计数的三个公开操作：切换、查询自身状态、查询总数。
//! 所有端点永远返回 200：存储故障由 LoveTracker 降级为惰性返回值，
//! 页面不因计数功能失败而受影响。
//!
//! 访客身份由连接信息推导（见 `utils::ip`），无 Cookie、无会话。

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

use crate::config::get_config;
use crate::services::{LoveTracker, VisitorContext};
use crate::utils::ip::extract_visitor_key;

/// 切换操作响应
///
/// `total_loves` 仅在计数可用时返回，降级时省略该字段。
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLoveResponse {
    pub success: bool,
    pub is_loved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_loves: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoveStatusResponse {
    pub is_loved: bool,
    pub total_loves: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoveCountResponse {
    pub count: u64,
}

pub struct LoveService;

impl LoveService {
    /// 从请求构建访客上下文
    ///
    /// client_hint / referrer 的采集受 tracking 配置开关控制，
    /// 关闭时对应字段不落库。
    fn visitor_context(req: &HttpRequest) -> VisitorContext {
        let config = get_config();

        let client_hint = if config.tracking.store_client_hint {
            req.headers()
                .get("user-agent")
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        } else {
            None
        };

        let referrer = if config.tracking.store_referrer {
            req.headers()
                .get("referer")
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        } else {
            None
        };

        VisitorContext {
            visitor_key: extract_visitor_key(req),
            client_hint,
            referrer,
        }
    }

    /// POST /api/love - 切换当前访客的互动状态
    pub async fn toggle_love(
        req: HttpRequest,
        tracker: web::Data<Arc<LoveTracker>>,
    ) -> impl Responder {
        let ctx = Self::visitor_context(&req);
        trace!("Love API: toggle request from visitor: {}", ctx.visitor_key);

        let outcome = tracker.toggle(&ctx).await;

        HttpResponse::Ok()
            .insert_header(("Cache-Control", "no-store"))
            .json(ToggleLoveResponse {
                success: outcome.success,
                is_loved: outcome.is_loved,
                total_loves: outcome.total_loves,
            })
    }

    /// GET /api/love - 查询当前访客的互动状态与总数
    pub async fn get_love_status(
        req: HttpRequest,
        tracker: web::Data<Arc<LoveTracker>>,
    ) -> impl Responder {
        let visitor_key = extract_visitor_key(&req);
        trace!("Love API: status request from visitor: {}", visitor_key);

        let status = tracker.status_for(&visitor_key).await;

        HttpResponse::Ok()
            .insert_header(("Cache-Control", "no-store"))
            .json(LoveStatusResponse {
                is_loved: status.is_loved,
                total_loves: status.total_loves,
            })
    }

    /// GET /api/love/count - 查询总数
    ///
    /// 计数永远取自数据库的新鲜值，禁止任何缓存层介入。
    pub async fn get_love_count(tracker: web::Data<Arc<LoveTracker>>) -> impl Responder {
        let count = tracker.count_active().await;

        HttpResponse::Ok()
            .insert_header(("Cache-Control", "no-store"))
            .json(LoveCountResponse { count })
    }
}

/// Love 路由配置
pub fn love_routes() -> actix_web::Scope {
    web::scope("/api/love")
        .route("", web::post().to(LoveService::toggle_love))
        .route("", web::get().to(LoveService::get_love_status))
        .route("", web::head().to(LoveService::get_love_status))
        .route("/count", web::get().to(LoveService::get_love_count))
        .route("/count", web::head().to(LoveService::get_love_count))
}
