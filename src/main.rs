use anyhow::Context;
use clap::Parser;
use obs_client::config::cli::Command;
use obs_client::utils::logger;
use obs_client::{
    CliConfig, ErrorCategory, File, MetaTarget, ObsError, Osc, PackageMaintainers, Person,
    SearchOptions,
};

fn describe(person: &Person) -> String {
    match person.role {
        Some(role) => format!("{} ({})", person.userid, role),
        None => person.userid.clone(),
    }
}

fn print_maintainers(maintainers: &PackageMaintainers) {
    println!("Package maintainers:");
    for person in &maintainers.package {
        println!("  {}", describe(person));
    }
    println!("Project maintainers:");
    for person in &maintainers.project {
        println!("  {}", describe(person));
    }
}

fn print_files(files: &[File]) {
    for file in files {
        let modified = chrono::DateTime::from_timestamp(file.mtime, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| file.mtime.to_string());
        println!(
            "{}  {:>10}  {}  {}",
            file.md5_sum, file.size, modified, file.name
        );
    }
}

async fn run(osc: &Osc, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Maintainers {
            package,
            role,
            ignore_group,
            json,
        } => {
            let options = SearchOptions {
                roles: role,
                groups_to_ignore: ignore_group,
            };
            let maintainers =
                obs_client::search_for_maintainers(osc, package.as_str().into(), &options).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&maintainers)?);
            } else {
                print_maintainers(&maintainers);
            }
        }
        Command::Files {
            project,
            package,
            json,
        } => {
            let files =
                obs_client::fetch_file_list(osc, project.as_str().into(), package.as_str().into())
                    .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&files)?);
            } else {
                print_files(&files);
            }
        }
        Command::Delete {
            project,
            package,
            force,
        } => {
            obs_client::delete(
                osc,
                project.as_str().into(),
                package.as_deref().map(Into::into),
                force,
            )
            .await?;
            println!("✅ Deleted");
        }
        Command::SendMeta {
            project,
            package,
            file,
        } => {
            let meta = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let target = match &package {
                Some(package_name) => MetaTarget::RawPackage {
                    project_name: &project,
                    package_name,
                    meta: &meta,
                },
                None => MetaTarget::RawProject {
                    project_name: &project,
                    meta: &meta,
                },
            };
            obs_client::send_meta(osc, target).await?;
            println!("✅ Meta updated");
        }
        Command::Upload {
            project,
            package,
            path,
            name,
        } => {
            let contents =
                std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            let filename = match name {
                Some(name) => name,
                None => path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_string)
                    .ok_or_else(|| {
                        ObsError::invalid_argument(format!(
                            "cannot derive a file name from {}",
                            path.display()
                        ))
                    })?,
            };
            obs_client::upload_file_contents(
                osc,
                project.as_str().into(),
                package.as_str().into(),
                &filename,
                contents,
            )
            .await?;
            println!("✅ Uploaded {}", filename);
        }
        Command::WaitService { project, package } => {
            obs_client::service_wait(osc, project.as_str().into(), package.as_str().into())
                .await?;
            println!("✅ Source services finished");
        }
    }

    Ok(())
}

async fn execute(config: &CliConfig) -> anyhow::Result<()> {
    let connection = config.connection()?;
    let osc = Osc::from_settings(&connection)?;
    tracing::debug!("Using API at {}", osc.api_url());
    run(&osc, config.command.clone()).await
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ObsError>().map(ObsError::category) {
        Some(ErrorCategory::Usage) | Some(ErrorCategory::Configuration) => 2,
        Some(ErrorCategory::Service) => 3,
        Some(ErrorCategory::Transport) | Some(ErrorCategory::Document) => 4,
        None => 1,
    }
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI command: {:?}", config.command);

    if let Err(e) = execute(&config).await {
        tracing::error!("❌ Command failed: {:#}", e);
        match e.downcast_ref::<ObsError>() {
            Some(obs_error) => eprintln!("❌ {}", obs_error.user_friendly_message()),
            None => eprintln!("❌ {:#}", e),
        }
        std::process::exit(exit_code(&e));
    }
}
