use std::env;
use std::sync::Arc;

use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use gainly_feedback_bot::engine::forward::BotForwarder;
use gainly_feedback_bot::engine::recipients::RecipientTable;
use gainly_feedback_bot::engine::store::SessionStore;
use gainly_feedback_bot::engine::FeedbackEngine;
use gainly_feedback_bot::{constants, handler, AppState};

/// Log to stdout and to a daily-rotating file under `logs/`. The returned
/// guard must stay alive for the file writer to flush.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(constants::LOG_DIR, constants::LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // The HTTP client crates are chatty at info; keep them at warn unless
    // RUST_LOG says otherwise.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();
    guard
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let _log_guard = init_logging();

    let token = env::var("BOT_TOKEN")
        .expect("Expected BOT_TOKEN in the environment or the .env file.");
    let bot = Bot::new(token);

    let engine = FeedbackEngine::new(
        SessionStore::new(),
        RecipientTable::default(),
        Arc::new(BotForwarder::new(bot.clone())),
    );
    let state = Arc::new(AppState::new(engine));

    tracing::info!(target: "startup", "feedback bot starting");

    Dispatcher::builder(bot, handler::schema())
        .dependencies(dptree::deps![state])
        .default_handler(|update| async move {
            tracing::debug!(target: "dispatch", update = ?update, "unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "update handler failed",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!(target: "startup", "dispatcher stopped");
}
