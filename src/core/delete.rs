use crate::core::{source_route, PackageRef, ProjectRef, Transport};
use crate::utils::error::Result;
use reqwest::Method;

/// Deletes a project, or a package when `package` is given.
///
/// Whether the deletion is safe is decided by the service; `force` asks it to
/// skip its dependency checks.
pub async fn delete<T: Transport + ?Sized>(
    transport: &T,
    project: ProjectRef<'_>,
    package: Option<PackageRef<'_>>,
    force: bool,
) -> Result<()> {
    let route = source_route(project.name(), package.map(|p| p.name()))?;
    let params: &[(&str, &str)] = if force { &[("force", "1")] } else { &[] };

    tracing::info!("Deleting {}{}", route, if force { " (forced)" } else { "" });
    transport
        .api_request(&route, Method::DELETE, params, None)
        .await?;

    Ok(())
}
