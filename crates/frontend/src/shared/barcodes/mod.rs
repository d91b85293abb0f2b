//! Barcode scanning: the scan dialog controller and the barcode action menu.

mod dialog;
mod dropdown;
mod machine;

pub use dialog::{use_barcode_scan_dialog, ScanCallback, ScanDialog, ScanDialogProps, ScanFuture};
pub use dropdown::BarcodeActionDropdown;
pub use machine::{reduce, ScanDialogState, ScanEvent, ScanMessage, ScanOutcome, ScanPhase};
