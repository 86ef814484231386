//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, ExprTrait, QueryFilter, SqlErr, TransactionTrait};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{
    click_record_to_active_model, model_to_link_entry, new_link_to_active_model,
};
use crate::errors::{QuicklinkrError, Result};
use crate::storage::models::{ClickRecord, LinkEntry, NewLink};

use migration::entities::{click_log, link};

impl SeaOrmStorage {
    /// 插入新链接
    ///
    /// short 列上有唯一索引；并发下 check-then-insert 输掉的一方会在这里
    /// 收到唯一约束冲突，映射为 CodeCollision 供生成器重试。
    pub async fn insert_link(&self, new_link: NewLink) -> Result<LinkEntry> {
        let active_model = new_link_to_active_model(&new_link);

        let model = link::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(msg)) => {
                    QuicklinkrError::code_collision(format!(
                        "Short code '{}' already exists: {}",
                        new_link.short, msg
                    ))
                }
                _ => QuicklinkrError::database_operation(format!(
                    "插入短链接 '{}' 失败: {}",
                    new_link.short, e
                )),
            })?;

        info!("Link created: {} -> {}", new_link.short, new_link.original);

        Ok(model_to_link_entry(model))
    }

    /// 点击数 +1（单条 UPDATE，避免读改写丢失更新）
    pub async fn increment_clicks(&self, id: i64) -> Result<()> {
        link::Entity::update_many()
            .col_expr(
                link::Column::Clicks,
                Expr::col(link::Column::Clicks).add(1),
            )
            .filter(link::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                QuicklinkrError::database_operation(format!("更新点击数失败 (id={}): {}", id, e))
            })?;

        Ok(())
    }

    /// 追加一条点击日志
    pub async fn log_click(&self, record: ClickRecord) -> Result<()> {
        let active_model = click_record_to_active_model(&record);

        click_log::Entity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| {
                QuicklinkrError::database_operation(format!(
                    "写入点击日志失败 (url_id={}): {}",
                    record.url_id, e
                ))
            })?;

        Ok(())
    }

    /// 清空所有链接和点击日志（使用事务，不可逆）
    pub async fn clear_all(&self) -> Result<()> {
        let txn = self.db.begin().await.map_err(|e| {
            QuicklinkrError::database_operation(format!("开始事务失败: {}", e))
        })?;

        click_log::Entity::delete_many()
            .exec(&txn)
            .await
            .map_err(|e| {
                QuicklinkrError::database_operation(format!("清空点击日志失败: {}", e))
            })?;

        link::Entity::delete_many().exec(&txn).await.map_err(|e| {
            QuicklinkrError::database_operation(format!("清空链接失败: {}", e))
        })?;

        txn.commit()
            .await
            .map_err(|e| QuicklinkrError::database_operation(format!("提交事务失败: {}", e)))?;

        info!("History cleared: all links and click logs deleted");
        Ok(())
    }
}
