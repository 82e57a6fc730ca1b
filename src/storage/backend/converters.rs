use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;

use crate::storage::models::{LoveEvent, LoveRecord};
use migration::entities::{love, love_event};

/// 将 Sea-ORM Model 转换为 LoveRecord
pub fn model_to_love_record(model: love::Model) -> LoveRecord {
    LoveRecord {
        visitor_key: model.visitor_key,
        is_active: model.is_active,
        first_seen_at: model.first_seen_at,
        last_changed_at: model.last_changed_at,
        client_hint: model.client_hint,
    }
}

/// 将 Sea-ORM Model 转换为 LoveEvent
pub fn model_to_love_event(model: love_event::Model) -> LoveEvent {
    LoveEvent {
        id: model.id,
        visitor_key: model.visitor_key,
        client_hint: model.client_hint,
        referrer: model.referrer,
        occurred_at: model.occurred_at,
    }
}

/// 构造首次点赞的 loves ActiveModel（is_active 固定为 true）
pub fn new_love_active_model(
    visitor_key: &str,
    client_hint: Option<String>,
    now: DateTime<Utc>,
) -> love::ActiveModel {
    love::ActiveModel {
        visitor_key: Set(visitor_key.to_string()),
        is_active: Set(true),
        first_seen_at: Set(now),
        last_changed_at: Set(now),
        client_hint: Set(client_hint),
    }
}

/// 构造首次点赞事件的 ActiveModel（id 交给数据库生成）
pub fn new_event_active_model(
    visitor_key: &str,
    client_hint: Option<String>,
    referrer: Option<String>,
    now: DateTime<Utc>,
) -> love_event::ActiveModel {
    love_event::ActiveModel {
        visitor_key: Set(visitor_key.to_string()),
        client_hint: Set(client_hint),
        referrer: Set(referrer),
        occurred_at: Set(now),
        ..Default::default()
    }
}
