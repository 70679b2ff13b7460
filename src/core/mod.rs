pub mod delete;
pub mod files;
pub mod group;
pub mod maintainers;
pub mod meta;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{PackageRef, ProjectRef};
pub use crate::domain::ports::Transport;
pub use crate::utils::error::Result;

use crate::utils::validation::validate_entity_name;

/// `/source/{project}` or `/source/{project}/{package}`.
pub(crate) fn source_route(project: &str, package: Option<&str>) -> Result<String> {
    validate_entity_name("project", project)?;
    match package {
        Some(package) => {
            validate_entity_name("package", package)?;
            Ok(format!("/source/{}/{}", project, package))
        }
        None => Ok(format!("/source/{}", project)),
    }
}
