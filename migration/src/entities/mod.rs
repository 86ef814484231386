pub mod click_log;
pub mod link;

pub use click_log::Entity as ClickLogEntity;
pub use link::Entity as LinkEntity;
