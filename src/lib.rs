pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::osc::Osc;
pub use config::{toml_config::TomlConfig, ConnectionConfig};
pub use crate::core::{
    delete::delete,
    files::{fetch_directory, fetch_file_list, upload_file_contents},
    group::fetch_group,
    maintainers::{search_for_maintainers, SearchOptions},
    meta::{fetch_package_meta, fetch_project_meta, send_meta, MetaTarget},
    service::service_wait,
};
pub use domain::document::XmlDocument;
pub use domain::model::{
    Directory, File, Package, PackageMaintainers, PackageRef, PathEntry, Person, PersonRole,
    Project, ProjectRef, Repository, UserGroup,
};
pub use domain::ports::{ConnectionSettings, Transport};
pub use utils::error::{ErrorCategory, ObsError, Result};
