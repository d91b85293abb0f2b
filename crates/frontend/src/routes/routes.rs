use crate::domain::a001_stock_location::ui::details::LocationDetail;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--custom">
            <h1 class="page__title">"Page not found"</h1>
            <a href="/stock/">"Back to stock"</a>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <main class="app-main">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=|| view! { <Redirect path="/stock/" /> } />
                    <Route path=path!("/stock") view=LocationDetail />
                    <Route path=path!("/stock/location/:id") view=LocationDetail />
                </Routes>
            </main>
        </Router>
    }
}
