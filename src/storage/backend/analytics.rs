//! Analytics 相关的数据库查询
//!
//! 提供点击日志的统计查询方法，供 AnalyticsService 调用。调用方负责
//! 把失败降级为空结果，所以这里返回 anyhow::Result 原样上抛。

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use migration::entities::click_log;

impl super::SeaOrmStorage {
    /// 统计时间范围内的点击日志条数
    pub async fn count_clicks_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<u64> {
        click_log::Entity::find()
            .filter(click_log::Column::ClickedAt.gte(start))
            .filter(click_log::Column::ClickedAt.lt(end))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    /// 取出时间范围内所有点击时间戳，升序
    ///
    /// 按天分桶在服务层的 Rust 代码里完成；SQL 里的日期分组表达式在
    /// SQLite/MySQL/PostgreSQL 之间不可移植，而趋势窗口只有 7 天，
    /// 数据量可控。
    pub async fn click_timestamps_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<DateTime<Utc>>> {
        click_log::Entity::find()
            .select_only()
            .column(click_log::Column::ClickedAt)
            .filter(click_log::Column::ClickedAt.gte(start))
            .filter(click_log::Column::ClickedAt.lt(end))
            .order_by_asc(click_log::Column::ClickedAt)
            .into_tuple::<DateTime<Utc>>()
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    /// 指定链接的点击日志条数（测试与 info 校验用）
    pub async fn count_clicks_for(&self, url_id: i64) -> anyhow::Result<u64> {
        click_log::Entity::find()
            .filter(click_log::Column::UrlId.eq(url_id))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }
}
