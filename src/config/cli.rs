use crate::domain::model::PersonRole;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the package and project maintainers of a package
    Maintainers {
        package: String,

        #[arg(long, value_enum, value_delimiter = ',', help = "Only owners with these roles")]
        role: Vec<PersonRole>,

        #[arg(long, value_delimiter = ',', help = "Groups whose members are not listed")]
        ignore_group: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// List the source files of a package
    Files {
        project: String,
        package: String,

        #[arg(long)]
        json: bool,
    },

    /// Delete a project, or a package inside it
    Delete {
        project: String,
        package: Option<String>,

        #[arg(long, help = "Skip the service's dependency checks")]
        force: bool,
    },

    /// Replace the _meta of a project or package with the contents of a file
    SendMeta {
        project: String,
        package: Option<String>,

        #[arg(long)]
        file: PathBuf,
    },

    /// Upload a file into a package's sources
    Upload {
        project: String,
        package: String,
        path: PathBuf,

        #[arg(long, help = "Remote file name (defaults to the local file name)")]
        name: Option<String>,
    },

    /// Block until the source services of a package have run
    WaitService { project: String, package: String },
}

#[cfg(test)]
mod tests {
    use crate::config::CliConfig;
    use crate::config::cli::Command;
    use crate::domain::model::PersonRole;
    use clap::Parser;

    #[test]
    fn test_parse_maintainers_command() {
        let cli = CliConfig::try_parse_from([
            "obs-client",
            "maintainers",
            "gcc",
            "--role",
            "maintainer,bugowner",
            "--ignore-group",
            "factory-maintainers",
        ])
        .unwrap();

        match cli.command {
            Command::Maintainers {
                package,
                role,
                ignore_group,
                json,
            } => {
                assert_eq!(package, "gcc");
                assert_eq!(role, vec![PersonRole::Maintainer, PersonRole::Bugowner]);
                assert_eq!(ignore_group, vec!["factory-maintainers".to_string()]);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_delete_command() {
        let cli =
            CliConfig::try_parse_from(["obs-client", "delete", "home:x", "pkgA", "--force"]).unwrap();

        match cli.command {
            Command::Delete {
                project,
                package,
                force,
            } => {
                assert_eq!(project, "home:x");
                assert_eq!(package.as_deref(), Some("pkgA"));
                assert!(force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
