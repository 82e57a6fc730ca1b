//! Admin API
//!
//! 只读的统计与事件查询端点，挂载在 /admin 前缀下，由 Bearer Token 鉴权保护。
//! 与公开 Love API 不同，本模块直接调用 storage 层并如实上报错误，
//! 运维需要看到真实的故障而不是降级后的默认值。

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::sync::Arc;
use tracing::{error, info, trace};

use crate::storage::{LoveEvent, SeaOrmStorage};

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub data: T,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GetEventsQuery {
    pub limit: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub backend: String,
    pub total_visitors: u64,
    pub active_loves: u64,
    pub total_events: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: i64,
    pub visitor_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    pub occurred_at: String,
}

impl From<LoveEvent> for EventResponse {
    fn from(event: LoveEvent) -> Self {
        Self {
            id: event.id,
            visitor_key: event.visitor_key,
            client_hint: event.client_hint,
            referrer: event.referrer,
            occurred_at: event.occurred_at.to_rfc3339(),
        }
    }
}

pub struct AdminService;

impl AdminService {
    fn json_response<T: Serialize>(status: StatusCode, code: ErrorCode, data: T) -> HttpResponse {
        HttpResponse::build(status)
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(ApiResponse {
                code: code as i32,
                data,
            })
    }

    fn success_response<T: Serialize>(data: T) -> HttpResponse {
        Self::json_response(StatusCode::OK, ErrorCode::Success, data)
    }

    fn error_response(status: StatusCode, code: ErrorCode, message: &str) -> HttpResponse {
        Self::json_response(status, code, serde_json::json!({ "error": message }))
    }

    /// GET /admin/stats - 聚合统计
    pub async fn get_stats(storage: web::Data<Arc<SeaOrmStorage>>) -> ActixResult<impl Responder> {
        trace!("Admin API: stats request");

        match storage.stats().await {
            Ok(stats) => Ok(Self::success_response(StatsResponse {
                backend: storage.backend_name().to_string(),
                total_visitors: stats.total_visitors,
                active_loves: stats.active_loves,
                total_events: stats.total_events,
            })),
            Err(e) => {
                error!("Admin API: failed to load stats: {}", e);
                Ok(Self::error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalServerError,
                    &format!("Error loading stats: {}", e),
                ))
            }
        }
    }

    /// GET /admin/events - 最近的互动事件，按时间倒序
    pub async fn get_events(
        query: web::Query<GetEventsQuery>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> ActixResult<impl Responder> {
        let limit = query.limit.unwrap_or(50).clamp(1, 500);
        trace!("Admin API: events request, limit: {}", limit);

        match storage.recent_events(limit).await {
            Ok(events) => {
                info!("Admin API: returning {} events", events.len());
                let events: Vec<EventResponse> =
                    events.into_iter().map(EventResponse::from).collect();
                Ok(Self::success_response(events))
            }
            Err(e) => {
                error!("Admin API: failed to load events: {}", e);
                Ok(Self::error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalServerError,
                    &format!("Error loading events: {}", e),
                ))
            }
        }
    }
}

/// Admin 路由配置
pub fn admin_routes() -> actix_web::Scope {
    web::scope("")
        .route("/stats", web::get().to(AdminService::get_stats))
        .route("/events", web::get().to(AdminService::get_events))
}
