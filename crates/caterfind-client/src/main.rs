//! caterfind CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::warn;

use caterfind_api::EventQuery;
use caterfind_client::cli::{Cli, Command, ConfigAction, EventsAction};
use caterfind_client::commands::{self, calendar::CalendarArgs};
use caterfind_client::config::ClientConfig;
use caterfind_client::error::{ClientError, ClientResult};
use caterfind_core::{EventDraft, TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path).map_err(ClientError::Config)?,
        None => ClientConfig::load().map_err(ClientError::Config)?,
    }
    .with_cli_overrides(&cli);

    if let Err(e) = init_tracing(TracingConfig::cli(config.debug)) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let Some(command) = cli.command else {
        println!("caterfind - Caterer availability calendar");
        println!();
        println!("Run 'caterfind --help' for usage information.");
        println!();
        println!("Quick start:");
        println!("  1. Point at your server: caterfind --base-url http://localhost:8080 config validate");
        println!("  2. Show this month:      caterfind --owner <ID> calendar");
        println!("  3. Mark a day:           caterfind --owner <ID> toggle 2026-02-21");
        return Ok(());
    };

    match command {
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
        Command::Calendar {
            month,
            read_only,
            embedded,
            select,
        } => {
            let backend = commands::backend(&config, cli.offline)?;
            let owner = config.owner().map_err(ClientError::Config)?;
            let args = CalendarArgs {
                month,
                read_only,
                embedded,
                select,
                json: cli.json,
            };
            commands::calendar::run(backend, owner, args).await
        }
        Command::Toggle { date } => {
            if cli.offline {
                warn!("Offline toggles are not kept after exit");
            }
            let backend = commands::backend(&config, cli.offline)?;
            let owner = config.owner().map_err(ClientError::Config)?;
            commands::toggle::run(backend, owner, date).await
        }
        Command::Events { action } => {
            let backend = commands::backend(&config, cli.offline)?;
            let owner = config.owner().map_err(ClientError::Config)?;
            match action {
                EventsAction::List { date, from, to } => {
                    let query = match (date, from, to) {
                        (Some(date), _, _) => EventQuery::OnDate(date),
                        (None, Some(start), Some(end)) => EventQuery::Range { start, end },
                        _ => EventQuery::All,
                    };
                    commands::events::list(backend, owner, query, cli.json).await
                }
                EventsAction::Add {
                    date,
                    host,
                    managed_by,
                    location,
                } => {
                    let mut draft = EventDraft::new(host);
                    if let Some(managed_by) = managed_by {
                        draft = draft.with_managed_by(managed_by);
                    }
                    if let Some(location) = location {
                        draft = draft.with_location(location);
                    }
                    commands::events::add(backend, owner, date, draft).await
                }
                EventsAction::Delete { id, yes } => {
                    commands::events::delete(backend, owner, id, yes).await
                }
            }
        }
    }
}
