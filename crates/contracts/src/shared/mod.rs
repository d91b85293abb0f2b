pub mod list_response;
pub mod navigation;
pub mod server_errors;
