use crate::{env::EnvManager, error::CliError};
use clap::Parser;
use commands::Commands;
use connectors::postgrest::source::PostgrestSource;
use model::{
    catalog::FieldCatalog,
    core::{
        identifiers::{AthleteId, UserId},
        profile::{CreateProfile, UpdateProfile},
    },
};
use planner::query::{builder::projection::SelectiveQueryBuilder, dialect::DialectKind};
use runtime::{params::parse_data_param, service::ProfileService};
use settings::Settings;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod env;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "liftlog",
    version = "0.1.0",
    about = "Athlete profile queries and edits"
)]
struct Cli {
    #[arg(long, global = true, help = "Load variables from a .env file")]
    env_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut env = EnvManager::from_process();
    if let Some(path) = &cli.env_file {
        env.load_from_file(path)?;
    }
    let settings = Settings::from_vars(env.all())?;
    let catalog = settings.load_catalog()?;

    match cli.command {
        Commands::Query {
            fields,
            dialect,
            ast,
        } => {
            let dialect = match dialect {
                Some(name) => name
                    .parse::<DialectKind>()
                    .map_err(|_| CliError::InvalidDialect(name.clone()))?,
                None => settings.dialect,
            };
            let fields = parse_data_param(fields.as_deref());
            let projection = SelectiveQueryBuilder::new(&catalog).build(fields.as_deref())?;
            if projection.is_default() {
                debug!("No fields given, rendering the default projection");
            }

            if ast {
                output::emit_json(&projection, None).await?;
            } else {
                println!("{}", projection.to_select(dialect.dialect()));
            }
        }
        Commands::Fetch { id, fields, output } => {
            let id = AthleteId::new(id);
            let fields = parse_data_param(fields.as_deref());
            let service = build_service(&settings, catalog)?;

            info!("Fetching profile '{}' via {}", id, settings.dialect);
            let record = service
                .retrieve_profile_details(&id, fields.as_deref())
                .await?;
            output::emit_json(&record, output).await?;
        }
        Commands::CreateProfile { user, profile } => {
            let profile: CreateProfile = read_json(&profile).await?;
            let service = build_service(&settings, catalog)?;
            service
                .create_user_profile(&UserId::new(user), &profile)
                .await?;
        }
        Commands::UpdateProfile { user, changes } => {
            let changes: UpdateProfile = read_json(&changes).await?;
            let service = build_service(&settings, catalog)?;
            service.update_profile(&UserId::new(user), &changes).await?;
        }
        Commands::Catalog { output } => {
            output::emit_json(&catalog.describe(), output).await?;
        }
    }

    Ok(())
}

fn build_service(settings: &Settings, catalog: FieldCatalog) -> Result<ProfileService, CliError> {
    let source = PostgrestSource::new(settings.postgrest_config()?)?;
    Ok(ProfileService::new(
        Arc::new(catalog),
        Arc::new(source),
        settings.dialect,
    ))
}

async fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, CliError> {
    let source = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&source)?)
}
