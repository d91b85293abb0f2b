pub mod u102_stock_adjustment;
