pub mod api;
pub mod context;

pub use context::{use_user_state, UserSession, UserState, UserStateProvider};
