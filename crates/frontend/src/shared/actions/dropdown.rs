use super::{visible_actions, ActionItem};
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Icon button opening a menu of actions; renders nothing when every action is hidden.
#[component]
pub fn ActionDropdown(
    #[prop(into)] tooltip: String,
    icon_name: &'static str,
    actions: Vec<ActionItem>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    let actions = visible_actions(&actions);
    if actions.is_empty() {
        return ().into_any();
    }
    let open = RwSignal::new(false);

    view! {
        <div class="action-dropdown">
            <Button
                appearance=ButtonAppearance::Subtle
                size=ButtonSize::Small
                disabled=Signal::derive(move || disabled.get().unwrap_or(false))
                attr:title=tooltip
                on_click=move |_| open.update(|o| *o = !*o)
            >
                {icon(icon_name)}
                {icon("chevron-down")}
            </Button>
            <Show when=move || open.get()>
                <div class="action-dropdown__backdrop" on:click=move |_| open.set(false)></div>
                <ul class="action-dropdown__menu" role="menu">
                    {actions
                        .clone()
                        .into_iter()
                        .map(|action| {
                            let on_click = action.on_click;
                            view! {
                                <li>
                                    <button
                                        class="action-dropdown__item"
                                        role="menuitem"
                                        title=action.tooltip
                                        on:click=move |_| {
                                            open.set(false);
                                            on_click.run(());
                                        }
                                    >
                                        {icon(action.icon)}
                                        <span>{action.name}</span>
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </Show>
        </div>
    }
    .into_any()
}

/// The "more options" menu (edit, delete)
#[component]
pub fn OptionsActionDropdown(#[prop(into)] tooltip: String, actions: Vec<ActionItem>) -> impl IntoView {
    view! { <ActionDropdown tooltip=tooltip icon_name="dots" actions=actions /> }
}
