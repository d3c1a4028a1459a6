mod console;
mod input;
mod store;

use std::sync::Arc;

use anyhow::Context;
use env_logger::Env;
use leecher_prefs::{
    CommandOutcome, PreferencesSession, PreferencesStore, Services,
};

use crate::console::{
    ConsoleDialogs, ConsoleNotifier, ConsoleTheme, LogErrorReporter,
};
use crate::input::{HELP, Input};
use crate::store::JsonPreferencesStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let store = Arc::new(
        JsonPreferencesStore::open()
            .context("failed to open the preferences store")?,
    );
    println!("editing {}", store.path().display());

    let session = PreferencesSession::new(Services {
        store: store.clone(),
        theme: Arc::new(ConsoleTheme),
        notifier: Arc::new(ConsoleNotifier),
        errors: Arc::new(LogErrorReporter),
        dialogs: Arc::new(ConsoleDialogs),
    });
    let menu: Vec<_> = session
        .menu_actions()
        .iter()
        .map(|action| action.label().to_lowercase())
        .collect();
    println!("{HELP}\nmenu: {}", menu.join(", "));

    while let Some(line) = console::read_line(String::from("> ")).await? {
        if line.is_empty() {
            continue;
        }

        match input::parse(&line) {
            Ok(Input::Command(command)) => {
                let outcome = session.dispatch(command).await;
                print_outcome(&session, outcome).await;
            },
            Ok(Input::Show) => show_draft(&session).await?,
            Ok(Input::Themes) => {
                println!("{}", session.available_themes().join(", "));
            },
            Ok(Input::Help) => println!("{HELP}"),
            Ok(Input::Quit) => break,
            Err(err) => eprintln!("{err}"),
        }
    }

    session.on_before_hidden().await;
    log::debug!(
        "session closed; committed theme is {}",
        store.current().theme()
    );
    Ok(())
}

async fn print_outcome(
    session: &PreferencesSession,
    outcome: CommandOutcome,
) {
    match outcome {
        CommandOutcome::Completed | CommandOutcome::Failed => {},
        CommandOutcome::Skipped => println!("nothing changed"),
        CommandOutcome::Rejected => {
            if let Some(message) = session.current_preferences_error().await {
                println!("{message}");
            }
            for error in session.validation_errors().await {
                println!("  - {error}");
            }
        },
    }
}

async fn show_draft(session: &PreferencesSession) -> anyhow::Result<()> {
    let draft = session.draft().await;
    let payload = serde_json::to_string_pretty(&draft)
        .context("failed to render the draft")?;
    println!("{payload}");
    println!("status: {:?}", session.status().await);
    Ok(())
}
