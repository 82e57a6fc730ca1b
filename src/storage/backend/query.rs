//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.
//! 所有查询直接打到数据库，不经过任何缓存，计数永远是新鲜值。

use sea_orm::{
    ColumnTrait, EntityTrait, ExprTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, sea_query::Expr,
};

use super::SeaOrmStorage;
use super::converters::{model_to_love_event, model_to_love_record};
use crate::errors::{LovemeterError, Result};
use crate::storage::models::{LoveEvent, LoveRecord, LoveStats};

use migration::entities::{love, love_event};

/// 用于统计查询的结果结构体（DSL 聚合查询）
#[derive(Debug, FromQueryResult)]
struct StatsResult {
    total_visitors: i64,
    active_loves: Option<i64>,
}

impl SeaOrmStorage {
    /// 按访客键查询点赞记录
    pub async fn find_love(&self, visitor_key: &str) -> Result<Option<LoveRecord>> {
        let model = love::Entity::find_by_id(visitor_key)
            .one(&self.db)
            .await
            .map_err(|e| {
                LovemeterError::database_operation(format!("查询点赞记录失败: {}", e))
            })?;

        Ok(model.map(model_to_love_record))
    }

    /// 当前处于点赞状态的访客数（COUNT 实时查询）
    pub async fn count_active(&self) -> Result<u64> {
        love::Entity::find()
            .filter(love::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| LovemeterError::database_operation(format!("点赞计数失败: {}", e)))
    }

    /// 首次点赞事件总数
    pub async fn count_events(&self) -> Result<u64> {
        love_event::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| LovemeterError::database_operation(format!("事件计数失败: {}", e)))
    }

    /// 最近的首次点赞事件，按时间倒序
    pub async fn recent_events(&self, limit: u64) -> Result<Vec<LoveEvent>> {
        let models = love_event::Entity::find()
            .order_by_desc(love_event::Column::OccurredAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                LovemeterError::database_operation(format!("查询最近事件失败: {}", e))
            })?;

        Ok(models.into_iter().map(model_to_love_event).collect())
    }

    /// 获取点赞统计信息（SeaORM DSL 聚合查询）
    pub async fn stats(&self) -> Result<LoveStats> {
        let result = love::Entity::find()
            .select_only()
            // COUNT(*) - 出现过的访客总数
            .column_as(love::Column::VisitorKey.count(), "total_visitors")
            // SUM(CASE WHEN is_active THEN 1 ELSE 0 END) - 当前点赞数
            .column_as(
                Expr::case(love::Column::IsActive.eq(true), 1).finally(0).sum(),
                "active_loves",
            )
            .into_model::<StatsResult>()
            .one(&self.db)
            .await
            .map_err(|e| LovemeterError::database_operation(format!("统计查询失败: {}", e)))?;

        let total_events = self.count_events().await?;

        match result {
            Some(stats) => Ok(LoveStats {
                total_visitors: Ord::max(stats.total_visitors, 0) as u64,
                active_loves: Ord::max(stats.active_loves.unwrap_or(0), 0) as u64,
                total_events,
            }),
            None => Ok(LoveStats {
                total_events,
                ..LoveStats::default()
            }),
        }
    }
}
