//! Terminal todo list.
//!
//! Configuration comes from the environment (see [`Config`]). Logs go to a
//! file because the terminal is taken over by the interface.

use std::fs::File;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tasklist::types::demo_entries;
use tasklist::{
    tui, Config, EntryList, TaskListEnvironment, TaskListError, TaskListReducer, TaskListState,
};
use tasklist_core::environment::SystemClock;
use tasklist_runtime::Store;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> Result<(), TaskListError> {
    let config = Config::from_env();
    init_tracing(&config)?;

    info!(
        owner = ?config.owner,
        seed_demo = config.seed_demo,
        date_format = %config.date_format,
        "Configuration loaded"
    );

    let entries = if config.seed_demo {
        EntryList::with_entries(demo_entries())
    } else {
        EntryList::new()
    };
    let env = TaskListEnvironment::new(Arc::new(SystemClock))
        .with_date_format(config.date_format.clone());
    let store = Store::new(TaskListState::with_entries(entries), TaskListReducer::new(), env);

    let result = tui::run(&store, &config.title()).await;

    let total = store.state(|s| s.entries.len()).await;
    info!(entries = total, "Session ended");
    if let Err(error) = store.shutdown(SHUTDOWN_TIMEOUT).await {
        warn!(%error, "Store did not shut down cleanly");
    }

    result
}

fn init_tracing(config: &Config) -> Result<(), TaskListError> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .map_err(|source| TaskListError::LogFile {
            path: config.log_file.clone(),
            source,
        })?;

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| {
        EnvFilter::new(tasklist::config::DEFAULT_LOG_FILTER)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;

    Ok(())
}
