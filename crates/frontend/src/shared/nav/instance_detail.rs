use crate::shared::instance::{InstanceQuery, InstanceState};
use crate::system::user_state::use_user_state;
use contracts::system::roles::UserRole;
use leptos::prelude::*;
use thaw::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceGate {
    Loading,
    Forbidden,
    Failed(String),
    Ready,
}

/// What a detail page may show.
///
/// Roles are checked before the record; a page without a pk (the collection
/// root) is ready as soon as the roles allow it.
pub fn instance_gate<T>(
    state: &InstanceState<T>,
    has_pk: bool,
    roles_loaded: bool,
    allowed: bool,
) -> InstanceGate {
    if !roles_loaded {
        return InstanceGate::Loading;
    }
    if !allowed {
        return InstanceGate::Forbidden;
    }
    if !has_pk {
        return InstanceGate::Ready;
    }
    match state {
        InstanceState::NotLoaded | InstanceState::Loading => InstanceGate::Loading,
        InstanceState::Failed { error, .. } => InstanceGate::Failed(error.clone()),
        InstanceState::Loaded { .. } => InstanceGate::Ready,
    }
}

#[component]
pub fn InstanceDetail<T>(
    query: InstanceQuery<T>,
    #[prop(into)] pk: Signal<Option<i64>>,
    required_role: UserRole,
    children: ChildrenFn,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    let user = use_user_state();
    let gate = Memo::new(move |_| {
        query.state.with(|state| {
            instance_gate(
                state,
                pk.get().is_some(),
                user.is_loaded(),
                user.has_view_role(required_role),
            )
        })
    });

    view! {
        {move || match gate.get() {
            InstanceGate::Loading => view! {
                <div class="instance-detail__loading">
                    <Spinner />
                </div>
            }
            .into_any(),
            InstanceGate::Forbidden => view! {
                <MessageBar intent=MessageBarIntent::Warning>
                    "You do not have permission to view this page"
                </MessageBar>
            }
            .into_any(),
            InstanceGate::Failed(error) => view! {
                <MessageBar intent=MessageBarIntent::Error>{error}</MessageBar>
            }
            .into_any(),
            InstanceGate::Ready => children().into_any(),
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_come_first() {
        let loaded = InstanceState::Loaded { pk: 1, value: () };
        assert_eq!(instance_gate(&loaded, true, false, true), InstanceGate::Loading);
        assert_eq!(instance_gate(&loaded, true, true, false), InstanceGate::Forbidden);
        assert_eq!(instance_gate(&loaded, true, true, true), InstanceGate::Ready);
    }

    #[test]
    fn test_root_page_needs_no_record() {
        let state: InstanceState<()> = InstanceState::NotLoaded;
        assert_eq!(instance_gate(&state, false, true, true), InstanceGate::Ready);
        assert_eq!(instance_gate(&state, true, true, true), InstanceGate::Loading);
    }

    #[test]
    fn test_failure_carries_message() {
        let state: InstanceState<()> = InstanceState::Failed {
            pk: 4,
            error: "Not found".to_string(),
        };
        assert_eq!(
            instance_gate(&state, true, true, true),
            InstanceGate::Failed("Not found".to_string())
        );
    }
}
