use crate::core::Transport;
use crate::domain::document::XmlDocument;
use crate::domain::model::UserGroup;
use crate::utils::error::Result;
use crate::utils::validation::validate_entity_name;
use reqwest::Method;

/// Fetches a group with its maintainers and members from `/group/{name}`.
///
/// A group that does not exist surfaces as a 404 [`crate::ObsError::Status`].
pub async fn fetch_group<T: Transport + ?Sized>(transport: &T, name: &str) -> Result<UserGroup> {
    validate_entity_name("group", name)?;

    let route = format!("/group/{}", name);
    tracing::debug!("Fetching group {}", name);
    let body = transport.api_request(&route, Method::GET, &[], None).await?;

    UserGroup::from_document(&body)
}
