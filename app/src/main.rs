//! Easy Event interactive shell
//!
//! Drives the auth store and the events view from stdin and prints the
//! rendered page after every command.
//!
//! Run with: cargo run --bin easy-event
//! Configure with `EASY_EVENT_GRAPHQL_URL`, `EASY_EVENT_REQUEST_TIMEOUT_SECS`
//! and `EASY_EVENT_LOG` (or a `.env` file).

use anyhow::Context;
use easy_event::auth::{AuthAction, Password};
use easy_event::command::{Command, HELP};
use easy_event::events::EventsAction;
use easy_event::{AppConfig, GraphQlEnvironment, Shell};
use easy_event_graphql::GraphQlClient;
use easy_event_runtime::EffectHandle;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long a command waits for its requests before printing the page
const COMMAND_WAIT: Duration = Duration::from_secs(30);
/// Shutdown grace period
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;
    init_tracing(&config.log_filter);

    let client = match config.request_timeout {
        Some(timeout) => GraphQlClient::with_timeout(&config.graphql_url, timeout)
            .context("Failed to build HTTP client")?,
        None => GraphQlClient::new(&config.graphql_url),
    };
    info!(endpoint = %config.graphql_url, "Starting Easy Event shell");

    let mut shell = Shell::new(GraphQlEnvironment::new(client));
    settle(shell.mount().await?).await;
    println!("{}", shell.render().await);
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            },
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            },
            command => {
                if let Err(e) = run(&mut shell, command).await {
                    warn!(error = %e, "Command failed");
                    println!("error: {e:#}");
                }
            },
        }

        println!("{}", shell.render().await);
    }

    info!("Shutting down");
    shell.shutdown(SHUTDOWN_TIMEOUT).await?;
    Ok(())
}

async fn run(shell: &mut Shell<GraphQlEnvironment>, command: Command) -> anyhow::Result<()> {
    let handle = match command {
        Command::Login { email, password } => {
            let password = Password::new(password);
            shell
                .auth()
                .send(AuthAction::SignIn { email, password })
                .await?
        },
        Command::Logout => shell.auth().send(AuthAction::Logout).await?,
        Command::Refresh => shell.events().send(EventsAction::Refresh).await?,
        Command::New => shell.events().send(EventsAction::StartCreate).await?,
        Command::Set { field, value } => {
            shell
                .events()
                .send(EventsAction::EditForm { field, value })
                .await?
        },
        Command::Create => shell.events().send(EventsAction::ConfirmCreate).await?,
        Command::View { event_id } => {
            shell
                .events()
                .send(EventsAction::ViewDetails { event_id })
                .await?
        },
        Command::Book => shell.events().send(EventsAction::ConfirmBooking).await?,
        Command::Cancel => shell.events().send(EventsAction::Cancel).await?,
        Command::Dismiss => {
            shell.auth().send(AuthAction::DismissError).await?;
            shell.events().send(EventsAction::DismissNotice).await?;
            shell.events().send(EventsAction::DismissError).await?
        },
        Command::Mount => shell.mount().await?,
        Command::Unmount => {
            shell.unmount().await?;
            return Ok(());
        },
        Command::Show | Command::Help | Command::Quit => return Ok(()),
    };

    settle(handle).await;
    shell.wait_for_session(COMMAND_WAIT).await?;
    Ok(())
}

async fn settle(mut handle: EffectHandle) {
    if handle.wait_with_timeout(COMMAND_WAIT).await.is_err() {
        warn!("Requests still running after {COMMAND_WAIT:?}");
    }
}

fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(filter)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
