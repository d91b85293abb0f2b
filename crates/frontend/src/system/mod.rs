pub mod user_state;
