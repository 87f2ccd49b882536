pub mod api_utils;
pub mod cascade;
pub mod column_filter;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod icons;
pub mod lifecycle;
pub mod list_utils;
pub mod modal;
pub mod notifications;
pub mod option_cache;
pub mod page_frame;
pub mod row_editor;
