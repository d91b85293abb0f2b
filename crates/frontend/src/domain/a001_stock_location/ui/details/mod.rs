//! Stock location detail page
//!
//! - model.rs: form schemas, scan request bodies and REST calls
//! - view_model.rs: permission-gated action plan and scan callbacks
//! - view.rs: the routed page
//! - tabs/: panel contents

mod model;
mod tabs;
mod view;
mod view_model;

pub use view::LocationDetail;
