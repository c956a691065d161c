// Module exports for models

pub mod app_data;
pub mod calendar;
pub mod filter;
pub mod member;
pub mod period;
pub mod work_item;
pub mod work_items;
