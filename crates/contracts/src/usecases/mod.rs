pub mod u101_barcode_scan;
pub mod u102_stock_adjustment;
pub mod u103_printing;
