use clap::{Args, Parser, Subcommand};
use log::{error, info, warn};
use serde::Serialize;

use taskdesk::auth::permissions::{Action, Entity};
use taskdesk::config::ClientConfig;
use taskdesk::error::{Result, TaskdeskError};
use taskdesk::models::Resource;
use taskdesk::services::ResourceService;
use taskdesk::Taskdesk;

#[derive(Parser, Debug)]
#[command(name = "taskdesk", about = "Command-line client for the Taskdesk API")]
struct Cli {
    /// Backend base URL; defaults to TASKDESK_API_URL or BACKEND_BASE_URL
    #[arg(long)]
    api_url: Option<String>,

    #[arg(long, env = "TASKDESK_EMAIL")]
    email: Option<String>,

    #[arg(long, env = "TASKDESK_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the identity and permissions in the token
    Login,
    Projects(EntityCommand),
    Tasks(TaskCommand),
    Users(EntityCommand),
    Roles(RoleCommand),
    Statuses(EntityCommand),
}

#[derive(Args, Debug)]
struct EntityCommand {
    #[command(subcommand)]
    command: EntitySubcommand,
}

#[derive(Subcommand, Debug)]
enum EntitySubcommand {
    List {
        /// Include deactivated rows
        #[arg(long)]
        all: bool,
    },
    /// Soft delete by id
    Deactivate { id: i64 },
}

#[derive(Args, Debug)]
struct TaskCommand {
    /// Only tasks of this project
    #[arg(long)]
    project: Option<i64>,

    #[command(subcommand)]
    command: EntitySubcommand,
}

#[derive(Args, Debug)]
struct RoleCommand {
    #[command(subcommand)]
    command: RoleSubcommand,
}

#[derive(Subcommand, Debug)]
enum RoleSubcommand {
    #[command(flatten)]
    Entity(EntitySubcommand),
    /// List the capability catalogue
    Permissions,
}

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    env_logger::init();

    match dotenv {
        Ok(path) => info!("Environment variables loaded from {}", path.display()),
        Err(e) => warn!("Failed to load .env file: {}", e),
    };

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("taskdesk failed: {}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_url(url)?;
    }
    info!("Configuration: api_url={}, timeout={:?}", config.api_url, config.timeout);

    let app = Taskdesk::new(config)?;
    let email = cli
        .email
        .ok_or_else(|| TaskdeskError::ConfigError("missing --email or TASKDESK_EMAIL".into()))?;
    let password = cli.password.ok_or_else(|| {
        TaskdeskError::ConfigError("missing --password or TASKDESK_PASSWORD".into())
    })?;
    let session = app.login(&email, &password).await?;

    match cli.command {
        Command::Login => {
            println!("Signed in as {} <{}>", session.user.full_name(), session.user.email);
            println!("Role: {}", session.user.role_name);
            println!("Permissions: {}", session.permissions);
            Ok(())
        }
        Command::Projects(cmd) => run_entity(&app, app.projects(), cmd.command).await,
        Command::Users(cmd) => run_entity(&app, app.users(), cmd.command).await,
        Command::Statuses(cmd) => run_entity(&app, app.task_statuses(), cmd.command).await,
        Command::Tasks(cmd) => match (cmd.project, cmd.command) {
            (Some(project_id), EntitySubcommand::List { all }) => {
                app.session().require(Action::View, Entity::Task)?;
                let tasks = app.tasks().list_for_project(project_id).await?;
                print_rows(tasks.into_iter().filter(|t| all || t.task_active).collect::<Vec<_>>())
            }
            (_, command) => run_entity(&app, app.tasks(), command).await,
        },
        Command::Roles(cmd) => match cmd.command {
            RoleSubcommand::Entity(command) => run_entity(&app, app.roles(), command).await,
            RoleSubcommand::Permissions => {
                app.session().require(Action::View, Entity::Role)?;
                print_rows(app.roles().list_permissions().await?)
            }
        },
    }
}

async fn run_entity<R>(
    app: &Taskdesk,
    service: &ResourceService<R>,
    command: EntitySubcommand,
) -> Result<()>
where
    R: Resource + Serialize,
{
    match command {
        EntitySubcommand::List { all } => {
            app.session().require(Action::View, R::ENTITY)?;
            let rows = if all {
                service.list().await?
            } else {
                service.list_active().await?
            };
            print_rows(rows)
        }
        EntitySubcommand::Deactivate { id } => {
            app.session().require(Action::Delete, R::ENTITY)?;
            let actor = app.session().actor_email()?;
            service.deactivate(id, &actor).await?;
            eprintln!("deactivated {} {}", R::ENTITY.label(), id);
            Ok(())
        }
    }
}

fn print_rows<T: Serialize>(rows: Vec<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
