use crate::core::{source_route, PackageRef, ProjectRef, Transport};
use crate::domain::document::XmlDocument;
use crate::domain::model::{Directory, File};
use crate::utils::error::Result;
use crate::utils::validation::validate_entity_name;
use reqwest::Method;

/// Fetches and parses the source directory listing of a package.
pub async fn fetch_directory<T: Transport + ?Sized>(
    transport: &T,
    project: ProjectRef<'_>,
    package: PackageRef<'_>,
) -> Result<Directory> {
    let route = source_route(project.name(), Some(package.name()))?;
    tracing::debug!("Fetching directory listing {}", route);

    let body = transport.api_request(&route, Method::GET, &[], None).await?;
    Directory::from_document(&body)
}

/// Fetch the list of files of a package in the given project.
///
/// Entries without a name, md5 sum, size or modification time are left out.
/// The order is the one the service returned.
pub async fn fetch_file_list<T: Transport + ?Sized>(
    transport: &T,
    project: ProjectRef<'_>,
    package: PackageRef<'_>,
) -> Result<Vec<File>> {
    let directory = fetch_directory(transport, project, package).await?;
    let total = directory.entry.len();

    let files: Vec<File> = directory.entry.iter().filter_map(File::from_entry).collect();

    if files.len() < total {
        tracing::debug!("Dropped {} incomplete directory entries", total - files.len());
    }

    Ok(files)
}

/// Stores `contents` as `filename` in the package's sources, replacing any existing file.
pub async fn upload_file_contents<T: Transport + ?Sized>(
    transport: &T,
    project: ProjectRef<'_>,
    package: PackageRef<'_>,
    filename: &str,
    contents: impl Into<Vec<u8>>,
) -> Result<()> {
    validate_entity_name("file", filename)?;
    let route = format!(
        "{}/{}",
        source_route(project.name(), Some(package.name()))?,
        filename
    );

    let contents = contents.into();
    tracing::debug!("Uploading {} ({} bytes)", route, contents.len());
    transport
        .api_request(&route, Method::PUT, &[], Some(contents))
        .await?;

    Ok(())
}
