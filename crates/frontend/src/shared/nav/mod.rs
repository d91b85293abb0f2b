//! Page chrome of detail pages: header, breadcrumbs, location tree drawer
//! and the gate shown until the record and the user's roles are known.

mod breadcrumbs;
mod instance_detail;
mod page_detail;
mod tree;

pub use breadcrumbs::Breadcrumbs;
pub use instance_detail::{instance_gate, InstanceDetail, InstanceGate};
pub use page_detail::PageDetail;
pub use tree::NavigationTree;
