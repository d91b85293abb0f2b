//! Count and transfer of the stock held at a location.
//!
//! - state.rs: editable rows and request building
//! - api.rs: REST calls
//! - view.rs: the modal and its opener hooks

mod api;
mod state;
mod view;

pub use state::{build_request, AdjustmentRequest, AdjustmentRow, StockOperation};
pub use view::{
    operation_filters, use_count_stock_item, use_transfer_stock_item, StockOperationModal,
    StockOperationProps,
};
