use crate::storage::models::{ClickRecord, LinkEntry, NewLink};
use migration::entities::{click_log, link};

/// 将 Sea-ORM Model 转换为 LinkEntry
pub fn model_to_link_entry(model: link::Model) -> LinkEntry {
    LinkEntry {
        id: model.id,
        original: model.original,
        short: model.short,
        clicks: model.clicks.max(0),
        created_at: model.created_at,
        expires_at: model.expires_at,
    }
}

/// 将 NewLink 转换为 ActiveModel（用于插入，id 由数据库生成）
pub fn new_link_to_active_model(new_link: &NewLink) -> link::ActiveModel {
    use sea_orm::ActiveValue::*;

    link::ActiveModel {
        id: NotSet,
        original: Set(new_link.original.clone()),
        short: Set(new_link.short.clone()),
        clicks: Set(0),
        created_at: Set(new_link.created_at),
        expires_at: Set(new_link.expires_at),
    }
}

/// 将 ClickRecord 转换为 ActiveModel
pub fn click_record_to_active_model(record: &ClickRecord) -> click_log::ActiveModel {
    use sea_orm::ActiveValue::*;

    click_log::ActiveModel {
        id: NotSet,
        url_id: Set(record.url_id),
        clicked_at: Set(record.clicked_at),
        user_agent: Set(record.user_agent.clone()),
        ip_address: Set(record.ip_address.clone()),
    }
}
