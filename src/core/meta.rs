use crate::core::{source_route, PackageRef, ProjectRef, Transport};
use crate::domain::document::{root_element_name, XmlDocument};
use crate::domain::model::{Package, Project};
use crate::utils::error::{ObsError, Result};
use reqwest::Method;

/// Where a `_meta` document goes and what it contains.
#[derive(Debug, Clone, Copy)]
pub enum MetaTarget<'a> {
    /// Publishes the project's own meta.
    Project(&'a Project),
    /// Publishes the package's meta inside `project`.
    Package {
        project: &'a Project,
        package: &'a Package,
    },
    /// A caller supplied `<project>` document.
    RawProject {
        project_name: &'a str,
        meta: &'a str,
    },
    /// A caller supplied `<package>` document.
    RawPackage {
        project_name: &'a str,
        package_name: &'a str,
        meta: &'a str,
    },
}

impl MetaTarget<'_> {
    /// Route and request body, checked before anything is sent.
    fn resolve(&self) -> Result<(String, String)> {
        let (base, document) = match self {
            MetaTarget::Project(project) => {
                (source_route(&project.name, None)?, project.to_document()?)
            }
            MetaTarget::Package { project, package } => (
                source_route(&project.name, Some(package.name.as_str()))?,
                package.to_document()?,
            ),
            MetaTarget::RawProject { project_name, meta } => (
                source_route(project_name, None)?,
                checked_raw_document(meta, Project::ELEMENT_NAME)?,
            ),
            MetaTarget::RawPackage {
                project_name,
                package_name,
                meta,
            } => (
                source_route(project_name, Some(*package_name))?,
                checked_raw_document(meta, Package::ELEMENT_NAME)?,
            ),
        };

        Ok((format!("{}/_meta", base), document))
    }
}

fn checked_raw_document(meta: &str, expected_root: &str) -> Result<String> {
    let root = root_element_name(meta).map_err(|e| {
        ObsError::invalid_argument(format!("raw meta document is not valid XML: {}", e))
    })?;

    if root != expected_root {
        return Err(ObsError::invalid_argument(format!(
            "raw meta document must have a <{}> root, got <{}>",
            expected_root, root
        )));
    }

    Ok(meta.to_string())
}

/// Replaces the `_meta` of a project or package with the given document.
pub async fn send_meta<T: Transport + ?Sized>(transport: &T, target: MetaTarget<'_>) -> Result<()> {
    let (route, document) = target.resolve()?;

    tracing::debug!("Sending meta to {} ({} bytes)", route, document.len());
    transport
        .api_request(&route, Method::PUT, &[], Some(document.into_bytes()))
        .await?;

    tracing::info!("Updated {}", route);
    Ok(())
}

pub async fn fetch_project_meta<T: Transport + ?Sized>(
    transport: &T,
    project: ProjectRef<'_>,
) -> Result<Project> {
    let route = format!("{}/_meta", source_route(project.name(), None)?);
    let body = transport.api_request(&route, Method::GET, &[], None).await?;
    Project::from_document(&body)
}

pub async fn fetch_package_meta<T: Transport + ?Sized>(
    transport: &T,
    project: ProjectRef<'_>,
    package: PackageRef<'_>,
) -> Result<Package> {
    let route = format!(
        "{}/_meta",
        source_route(project.name(), Some(package.name()))?
    );
    let body = transport.api_request(&route, Method::GET, &[], None).await?;
    Package::from_document(&body)
}
