pub mod common;

pub mod a001_division;
pub mod a002_so_type;
pub mod a003_customer;
pub mod a004_item_catalog;
pub mod a005_sales_order;
pub mod a006_sales_order_line;
