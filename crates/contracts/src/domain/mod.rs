pub mod a001_stock_location;
pub mod a002_stock_item;
pub mod a003_part;
pub mod common;
