//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.
//!
//! 切换由两个原语组成：`flip_active` 对已有行做原子翻转，
//! `create_active` 在事务里创建首条记录并追加事件行。两者都以
//! 数据库自身的原子性为准，不在进程内加锁。

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, ExprTrait, QueryFilter, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{new_event_active_model, new_love_active_model};
use crate::errors::{LovemeterError, Result};

use migration::entities::{love, love_event};

impl SeaOrmStorage {
    /// 原子翻转访客的点赞状态
    ///
    /// 单条 UPDATE 语句完成读改写，并发调用由数据库串行化，
    /// 不会出现两个请求读到同一旧值的丢失更新。
    ///
    /// 返回受影响的行数：1 表示翻转成功，0 表示记录不存在。
    pub async fn flip_active(&self, visitor_key: &str, now: DateTime<Utc>) -> Result<u64> {
        let result = love::Entity::update_many()
            .col_expr(love::Column::IsActive, Expr::col(love::Column::IsActive).not())
            .col_expr(love::Column::LastChangedAt, Expr::value(now))
            .filter(love::Column::VisitorKey.eq(visitor_key))
            .exec(&self.db)
            .await
            .map_err(|e| {
                LovemeterError::database_operation(format!("翻转点赞状态失败: {}", e))
            })?;

        debug!(
            "flip_active: visitor={} rows_affected={}",
            visitor_key, result.rows_affected
        );
        Ok(result.rows_affected)
    }

    /// 为首次出现的访客创建点赞记录，并在同一事务里追加首次点赞事件
    ///
    /// 插入使用 ON CONFLICT DO NOTHING：若并发请求抢先创建了记录，
    /// 本次插入影响 0 行，事件也不会写入，保证每个访客键最多一条事件。
    ///
    /// 返回是否真的创建了记录。
    pub async fn create_active(
        &self,
        visitor_key: &str,
        client_hint: Option<String>,
        referrer: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LovemeterError::database_operation(format!("开始事务失败: {}", e)))?;

        let inserted = love::Entity::insert(new_love_active_model(
            visitor_key,
            client_hint.clone(),
            now,
        ))
        .on_conflict(
            OnConflict::column(love::Column::VisitorKey)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await
        .map_err(|e| LovemeterError::database_operation(format!("创建点赞记录失败: {}", e)))?;

        if inserted == 0 {
            // 记录已存在（并发创建竞争失败），什么都没写
            txn.rollback().await.map_err(|e| {
                LovemeterError::database_operation(format!("回滚事务失败: {}", e))
            })?;
            debug!("create_active: visitor={} already exists", visitor_key);
            return Ok(false);
        }

        love_event::Entity::insert(new_event_active_model(
            visitor_key,
            client_hint,
            referrer,
            now,
        ))
        .exec_without_returning(&txn)
        .await
        .map_err(|e| LovemeterError::database_operation(format!("写入点赞事件失败: {}", e)))?;

        txn.commit()
            .await
            .map_err(|e| LovemeterError::database_operation(format!("提交事务失败: {}", e)))?;

        debug!("create_active: visitor={} created", visitor_key);
        Ok(true)
    }
}
