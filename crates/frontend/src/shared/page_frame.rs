//! Root wrapper of every routed page and embedded table.
//!
//! ```ignore
//! view! {
//!     <PageFrame page_id="a001_stock_location--detail" category=PAGE_CAT_DETAIL>
//!         <div class="page__header">...</div>
//!         <div class="page__content">...</div>
//!     </PageFrame>
//! }
//! ```

use super::page_standard::page_class;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a001_stock_location--detail"`
    page_id: &'static str,
    /// One of the `PAGE_CAT_*` constants
    category: &'static str,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(
        super::page_standard::is_valid_page_id(page_id),
        "malformed page id {page_id}"
    );

    let full_class = if class.is_empty() {
        page_class(category).to_string()
    } else {
        format!("{} {class}", page_class(category))
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}
