use super::api;
use crate::shared::api::ApiClient;
use contracts::system::roles::{UserInfo, UserRole, UserRoles};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Who is signed in and what they may do
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserSession {
    pub user: Option<UserInfo>,
    pub roles: UserRoles,
    /// Both requests have completed (successfully or not)
    pub loaded: bool,
}

/// Handle to the session, provided by `UserStateProvider`.
///
/// Every check reads the session reactively, so views and memos that call
/// them update once the roles arrive.
#[derive(Clone, Copy)]
pub struct UserState {
    session: RwSignal<UserSession>,
}

impl UserState {
    pub fn new(session: UserSession) -> Self {
        Self {
            session: RwSignal::new(session),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.session.with(|s| s.loaded)
    }

    pub fn roles(&self) -> UserRoles {
        self.session.with(|s| s.roles.clone())
    }

    pub fn is_staff(&self) -> bool {
        self.session.with(|s| s.roles.is_staff())
    }

    pub fn has_view_role(&self, role: UserRole) -> bool {
        self.session.with(|s| s.roles.has_view_role(role))
    }
}

/// Loads the current user and their roles, then provides `UserState`.
#[component]
pub fn UserStateProvider(api: ApiClient, children: Children) -> impl IntoView {
    let state = UserState::new(UserSession::default());
    provide_context(state);

    spawn_local(async move {
        let user = match api::fetch_current_user(&api).await {
            Ok(user) => Some(user),
            Err(e) => {
                log::error!("failed to load current user: {}", e);
                None
            }
        };
        let roles = match api::fetch_user_roles(&api).await {
            Ok(roles) => roles,
            Err(e) => {
                log::error!("failed to load user roles: {}", e);
                UserRoles::default()
            }
        };
        if let Some(user) = &user {
            log::info!("signed in as {}", user.display_name());
        }
        state.session.set(UserSession {
            user,
            roles,
            loaded: true,
        });
    });

    children()
}

pub fn use_user_state() -> UserState {
    use_context::<UserState>().expect("UserStateProvider not found in component tree")
}
