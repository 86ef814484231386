//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations. History and
//! stats reads degrade to empty/default results on failure; the reporting
//! endpoints must stay available even when a query breaks.

use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::error;

use super::SeaOrmStorage;
use super::converters::model_to_link_entry;
use crate::errors::{QuicklinkrError, Result};
use crate::storage::models::{LinkEntry, LinkStats};

use migration::entities::link;

/// 用于统计查询的结果结构体（DSL 聚合查询）
#[derive(Debug, FromQueryResult)]
struct StatsResult {
    total_links: i64,
    total_clicks: Option<i64>,
}

impl SeaOrmStorage {
    pub async fn get_by_short(&self, code: &str) -> Option<LinkEntry> {
        let result = link::Entity::find()
            .filter(link::Column::Short.eq(code))
            .one(&self.db)
            .await;

        match result {
            Ok(Some(model)) => Some(model_to_link_entry(model)),
            Ok(None) => None,
            Err(e) => {
                error!("查询短链接失败: {}", e);
                None
            }
        }
    }

    /// 短码是否已被占用（生成器与自定义码校验使用）
    pub async fn short_exists(&self, code: &str) -> Result<bool> {
        let count = link::Entity::find()
            .filter(link::Column::Short.eq(code))
            .count(&self.db)
            .await
            .map_err(|e| {
                QuicklinkrError::database_operation(format!("检查短码是否存在失败: {}", e))
            })?;

        Ok(count > 0)
    }

    /// 最近创建的 N 条链接，按创建顺序倒序
    pub async fn recent(&self, limit: u64) -> Vec<LinkEntry> {
        match link::Entity::find()
            .order_by_desc(link::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
        {
            Ok(models) => models.into_iter().map(model_to_link_entry).collect(),
            Err(e) => {
                error!("加载最近链接失败: {}", e);
                Vec::new()
            }
        }
    }

    /// 按点击数倒序的前 N 条链接
    pub async fn top_by_clicks(&self, limit: u64) -> Vec<LinkEntry> {
        match link::Entity::find()
            .order_by_desc(link::Column::Clicks)
            .limit(limit)
            .all(&self.db)
            .await
        {
            Ok(models) => models.into_iter().map(model_to_link_entry).collect(),
            Err(e) => {
                error!("加载热门链接失败: {}", e);
                Vec::new()
            }
        }
    }

    /// 获取链接统计信息（SeaORM DSL 聚合查询）
    pub async fn get_stats(&self) -> LinkStats {
        let result = link::Entity::find()
            .select_only()
            // COUNT(id) - 总链接数
            .column_as(link::Column::Id.count(), "total_links")
            // SUM(clicks) - 总点击数
            .column_as(link::Column::Clicks.sum(), "total_clicks")
            .into_model::<StatsResult>()
            .one(&self.db)
            .await;

        match result {
            Ok(Some(stats)) => LinkStats {
                total_links: stats.total_links.max(0) as u64,
                total_clicks: stats.total_clicks.unwrap_or(0).max(0) as u64,
            },
            Ok(None) => LinkStats::default(),
            Err(e) => {
                error!("统计查询失败: {}", e);
                LinkStats::default()
            }
        }
    }
}
