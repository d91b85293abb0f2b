use super::Breadcrumbs;
use crate::shared::icons::icon;
use contracts::shared::navigation::Crumb;
use leptos::prelude::*;
use thaw::*;

/// Header of a detail page.
///
/// `actions` is rendered on the right of the title row and re-renders when
/// the signals it reads change. When `stale` is set a
/// notice with a refresh button is shown under the header.
#[component]
pub fn PageDetail(
    #[prop(into)] title: Signal<String>,
    #[prop(optional, into)] subtitle: MaybeProp<String>,
    #[prop(optional, into)] icon_name: MaybeProp<String>,
    #[prop(into)] breadcrumbs: Signal<Vec<Crumb>>,
    #[prop(optional, into)] on_breadcrumb_action: Option<Callback<()>>,
    /// Pencil button next to the title, shown while `edit_enabled` holds
    #[prop(optional, into)]
    edit_action: Option<Callback<()>>,
    #[prop(optional, into)] edit_enabled: MaybeProp<bool>,
    #[prop(optional, into)] stale: MaybeProp<bool>,
    #[prop(optional, into)] on_refresh: Option<Callback<()>>,
    #[prop(optional, into)] actions: ViewFn,
) -> impl IntoView {
    view! {
        <div class="page-detail">
            {match on_breadcrumb_action {
                Some(cb) => view! { <Breadcrumbs crumbs=breadcrumbs on_action=cb /> }.into_any(),
                None => view! { <Breadcrumbs crumbs=breadcrumbs /> }.into_any(),
            }}
            <div class="page-detail__header">
                <Flex gap=FlexGap::Small align=FlexAlign::Center attr:class="page-detail__title">
                    {move || icon_name.get().map(|name| icon(&name))}
                    <div>
                        <h2>{move || title.get()}</h2>
                        {move || subtitle.get().filter(|s| !s.is_empty()).map(|s| view! {
                            <div class="page-detail__subtitle">{s}</div>
                        })}
                    </div>
                    {edit_action.map(|cb| view! {
                        <Show when=move || edit_enabled.get().unwrap_or(false)>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                size=ButtonSize::Small
                                attr:title="Edit"
                                on_click=move |_| cb.run(())
                            >
                                {icon("edit")}
                            </Button>
                        </Show>
                    })}
                </Flex>
                <Flex gap=FlexGap::Small align=FlexAlign::Center attr:class="page-detail__actions">
                    {move || actions.run()}
                </Flex>
            </div>
            <Show when=move || stale.get().unwrap_or(false)>
                <div class="page-detail__stale">
                    <MessageBar intent=MessageBarIntent::Warning>
                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                            <span>"This record was changed. Refresh to see the latest data."</span>
                            {on_refresh.map(|cb| view! {
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    size=ButtonSize::Small
                                    on_click=move |_| cb.run(())
                                >
                                    {icon("refresh")}
                                    " Refresh"
                                </Button>
                            })}
                        </Flex>
                    </MessageBar>
                </div>
            </Show>
        </div>
    }
}
