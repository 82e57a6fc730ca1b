use serde::{Deserialize, Serialize};

/// 单个访客的点赞状态记录
///
/// 每个访客键一行，切换时翻转 `is_active` 而不是删除行，
/// 因此 `first_seen_at` 保留首次点赞时间。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoveRecord {
    pub visitor_key: String,
    pub is_active: bool,
    pub first_seen_at: chrono::DateTime<chrono::Utc>,
    pub last_changed_at: chrono::DateTime<chrono::Utc>,
    pub client_hint: Option<String>,
}

/// 首次点赞事件（只追加，不更新）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoveEvent {
    pub id: i64,
    pub visitor_key: String,
    pub client_hint: Option<String>,
    pub referrer: Option<String>,
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

/// 点赞聚合统计
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoveStats {
    /// 出现过的访客总数（含已取消点赞的）
    pub total_visitors: u64,
    /// 当前处于点赞状态的访客数
    pub active_loves: u64,
    /// 首次点赞事件总数
    pub total_events: u64,
}
