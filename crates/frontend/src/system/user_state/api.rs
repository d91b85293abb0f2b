use crate::shared::api::{ApiClient, ApiError};
use contracts::domain::common::ApiEndpoint;
use contracts::system::roles::{UserInfo, UserRoles};

pub async fn fetch_current_user(api: &ApiClient) -> Result<UserInfo, ApiError> {
    api.get(&ApiEndpoint::UserMe.url(None), &[]).await
}

pub async fn fetch_user_roles(api: &ApiClient) -> Result<UserRoles, ApiError> {
    api.get(&ApiEndpoint::UserRoles.url(None), &[]).await
}
