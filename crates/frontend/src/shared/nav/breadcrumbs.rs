use crate::shared::icons::icon;
use contracts::shared::navigation::Crumb;
use leptos::prelude::*;
use leptos_router::components::A;
use thaw::*;

#[component]
pub fn Breadcrumbs(
    #[prop(into)] crumbs: Signal<Vec<Crumb>>,
    /// Button in front of the trail, opens the navigation tree
    #[prop(optional, into)]
    on_action: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <nav class="breadcrumbs" aria-label="breadcrumb">
            {on_action.map(|cb| view! {
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    attr:title="Open navigation tree"
                    on_click=move |_| cb.run(())
                >
                    {icon("tree")}
                </Button>
            })}
            {move || {
                let crumbs = crumbs.get();
                let last = crumbs.len().saturating_sub(1);
                crumbs
                    .into_iter()
                    .enumerate()
                    .map(|(i, crumb)| {
                        let class = if i == last {
                            "breadcrumbs__item breadcrumbs__item--current"
                        } else {
                            "breadcrumbs__item"
                        };
                        view! {
                            {(i > 0).then(|| view! { <span class="breadcrumbs__sep">"/"</span> })}
                            <span class=class>
                                {crumb.icon.as_deref().map(icon)}
                                <A href=crumb.url>{crumb.name}</A>
                            </span>
                        }
                    })
                    .collect_view()
            }}
        </nav>
    }
}
