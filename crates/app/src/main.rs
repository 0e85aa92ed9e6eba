use std::process::ExitCode;

use clap::Parser;
use engine::Repository;
use migration::{Migrator, MigratorTrait};
use settings::{Database, Settings};

use crate::{
    cli::{Cli, Command},
    error::Result,
};

mod cli;
mod commands;
mod error;
mod settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = match Settings::new(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("failed to load settings: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(database) = cli.database.as_deref() {
        settings.database = Database::from_arg(database);
    }

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spendbook={level},engine={level},sync={level},server={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    let command = match command {
        Command::Serve(args) => return commands::serve(settings, args).await,
        other => other,
    };

    let db = match connect_database(&settings.database).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!("failed to initialize database: {err}");
            return Err(err);
        }
    };
    let repository = Repository::builder().database(db).build()?;

    match command {
        Command::Add(args) => commands::add(&repository, args).await.map(|_| ()),
        Command::List(args) => commands::list(&repository, args).await.map(|_| ()),
        Command::Show { id } => commands::show(&repository, id).await.map(|_| ()),
        Command::Edit(args) => commands::edit(&repository, args).await,
        Command::Delete { id } => commands::delete(&repository, id).await,
        Command::Restore { id } => commands::restore(&repository, id).await,
        Command::Sync(args) => commands::sync_remote(&repository, settings, args)
            .await
            .map(|_| ()),
        Command::Serve(_) => Ok(()),
    }
}

/// Opens the store and makes sure the transactions table exists.
async fn connect_database(config: &Database) -> Result<sea_orm::DatabaseConnection> {
    let database = sea_orm::Database::connect(config.url()).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
