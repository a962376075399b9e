pub mod api_utils;
pub mod components;
pub mod dynamic_table;
pub mod embed;
pub mod icons;
pub mod list_utils;
pub mod modal;
pub mod navigation;
