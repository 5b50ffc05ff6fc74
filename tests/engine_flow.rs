//! Flow-level tests of the conversation engine against a recording forwarder.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use teloxide::types::{ChatId, UserId};
use tokio::sync::Mutex;

use gainly_feedback_bot::engine::forward::FeedbackForwarder;
use gainly_feedback_bot::engine::recipients::RecipientTable;
use gainly_feedback_bot::engine::session::{AppFormat, FeedbackType, Sender, Stage};
use gainly_feedback_bot::engine::store::SessionStore;
use gainly_feedback_bot::engine::{FeedbackEngine, FlowError};

#[derive(Default)]
struct RecordingForwarder {
    sent: Mutex<Vec<(ChatId, String)>>,
    attempts: AtomicUsize,
    fail: AtomicBool,
}

#[async_trait]
impl FeedbackForwarder for RecordingForwarder {
    async fn forward(&self, recipient: ChatId, body: &str) -> anyhow::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("transport unavailable");
        }
        self.sent.lock().await.push((recipient, body.to_string()));
        Ok(())
    }
}

const R1: ChatId = ChatId(101);
const R2: ChatId = ChatId(102);
const R3: ChatId = ChatId(103);

fn table() -> RecipientTable {
    use AppFormat::*;
    use FeedbackType::*;
    RecipientTable::new([
        ((Android, Wishes), R1),
        ((Android, Features), R2),
        ((MiniApp, Wishes), R3),
        ((MiniApp, Features), R2),
    ])
}

fn engine(forwarder: Arc<RecordingForwarder>) -> FeedbackEngine {
    FeedbackEngine::new(SessionStore::new(), table(), forwarder)
}

fn sender(id: u64) -> Sender {
    Sender {
        id: UserId(id),
        username: Some(format!("user{id}")),
    }
}

#[tokio::test]
async fn begin_opens_the_format_step() {
    let engine = engine(Arc::default());
    let user = UserId(1);

    assert_eq!(engine.stage(user).await, None);
    engine.begin(user).await;
    assert_eq!(engine.stage(user).await, Some(Stage::AwaitingFormat));
}

#[tokio::test]
async fn restart_overwrites_a_half_finished_session() {
    let engine = engine(Arc::default());
    let user = UserId(1);

    engine.begin(user).await;
    engine.select_format(user, AppFormat::Android).await.unwrap();
    assert_eq!(engine.stage(user).await, Some(Stage::AwaitingFeedbackType));

    engine.begin(user).await;
    assert_eq!(engine.stage(user).await, Some(Stage::AwaitingFormat));
    // The discarded session's format is gone: picking a type now is stale.
    assert!(matches!(
        engine.select_feedback_type(user, FeedbackType::Wishes).await,
        Err(FlowError::StaleSelection)
    ));
}

#[tokio::test]
async fn full_flow_delivers_exactly_once_to_the_routed_recipient() {
    let forwarder = Arc::new(RecordingForwarder::default());
    let engine = engine(forwarder.clone());
    let sender = sender(7);

    engine.begin(sender.id).await;
    engine.select_format(sender.id, AppFormat::Android).await.unwrap();
    let format = engine
        .select_feedback_type(sender.id, FeedbackType::Wishes)
        .await
        .unwrap();
    assert_eq!(format, AppFormat::Android);

    let recipient = engine.submit(&sender, "hello").await.unwrap();
    assert_eq!(recipient, R1);

    let sent = forwarder.sent.lock().await;
    assert_eq!(sent.len(), 1);
    let (to, body) = &sent[0];
    assert_eq!(*to, R1);
    assert!(body.contains("hello"));
    assert!(body.contains("@user7"));
    assert!(body.contains("ID: 7"));
    assert!(body.contains(AppFormat::Android.label()));
    assert!(body.contains(FeedbackType::Wishes.label()));

    // The session never survives a submission.
    assert_eq!(engine.stage(sender.id).await, None);
}

#[tokio::test]
async fn submit_without_a_session_expires_and_sends_nothing() {
    let forwarder = Arc::new(RecordingForwarder::default());
    let engine = engine(forwarder.clone());

    let result = engine.submit(&sender(9), "orphan text").await;
    assert!(matches!(result, Err(FlowError::SessionExpired)));
    assert_eq!(forwarder.attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn selections_without_a_session_expire() {
    let engine = engine(Arc::default());
    let user = UserId(4);

    assert!(matches!(
        engine.select_format(user, AppFormat::MiniApp).await,
        Err(FlowError::SessionExpired)
    ));
    assert!(matches!(
        engine.select_feedback_type(user, FeedbackType::Features).await,
        Err(FlowError::SessionExpired)
    ));
}

#[tokio::test]
async fn text_before_the_menus_are_done_writes_nothing() {
    let forwarder = Arc::new(RecordingForwarder::default());
    let engine = engine(forwarder.clone());
    let sender = sender(5);

    engine.begin(sender.id).await;
    assert!(matches!(
        engine.submit(&sender, "too early").await,
        Err(FlowError::AwaitingChoice)
    ));
    // Still on step 1, and the form continues normally from there.
    assert_eq!(engine.stage(sender.id).await, Some(Stage::AwaitingFormat));
    engine.select_format(sender.id, AppFormat::MiniApp).await.unwrap();

    assert!(matches!(
        engine.submit(&sender, "still early").await,
        Err(FlowError::AwaitingChoice)
    ));
    assert_eq!(
        engine.stage(sender.id).await,
        Some(Stage::AwaitingFeedbackType)
    );
    assert_eq!(forwarder.attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn duplicate_button_presses_are_stale() {
    let engine = engine(Arc::default());
    let user = UserId(6);

    engine.begin(user).await;
    engine.select_format(user, AppFormat::Android).await.unwrap();
    // Pressing a step-1 button again does not rewind or rewrite the choice.
    assert!(matches!(
        engine.select_format(user, AppFormat::MiniApp).await,
        Err(FlowError::StaleSelection)
    ));
    assert_eq!(engine.stage(user).await, Some(Stage::AwaitingFeedbackType));

    engine
        .select_feedback_type(user, FeedbackType::Features)
        .await
        .unwrap();
    assert!(matches!(
        engine.select_feedback_type(user, FeedbackType::Wishes).await,
        Err(FlowError::StaleSelection)
    ));
    assert_eq!(engine.stage(user).await, Some(Stage::AwaitingMessage));
}

#[tokio::test]
async fn delivery_failure_is_terminal_and_destroys_the_session() {
    let forwarder = Arc::new(RecordingForwarder::default());
    forwarder.fail.store(true, Ordering::SeqCst);
    let engine = engine(forwarder.clone());
    let sender = sender(8);

    engine.begin(sender.id).await;
    engine.select_format(sender.id, AppFormat::Android).await.unwrap();
    engine
        .select_feedback_type(sender.id, FeedbackType::Features)
        .await
        .unwrap();

    let result = engine.submit(&sender, "will not arrive").await;
    match result {
        Err(FlowError::Delivery(detail)) => assert!(detail.contains("transport unavailable")),
        other => panic!("expected delivery failure, got {other:?}"),
    }

    // Exactly one attempt, no retry, session gone.
    assert_eq!(forwarder.attempts.load(Ordering::SeqCst), 1);
    assert_eq!(engine.stage(sender.id).await, None);
    assert!(matches!(
        engine.submit(&sender, "second try").await,
        Err(FlowError::SessionExpired)
    ));
    assert_eq!(forwarder.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_table_entry_is_a_configuration_error() {
    let forwarder = Arc::new(RecordingForwarder::default());
    let engine = FeedbackEngine::new(SessionStore::new(), RecipientTable::new([]), forwarder.clone());
    let sender = sender(10);

    engine.begin(sender.id).await;
    engine.select_format(sender.id, AppFormat::MiniApp).await.unwrap();
    engine
        .select_feedback_type(sender.id, FeedbackType::Wishes)
        .await
        .unwrap();

    assert!(matches!(
        engine.submit(&sender, "nowhere to go").await,
        Err(FlowError::RecipientNotConfigured {
            format: AppFormat::MiniApp,
            feedback_type: FeedbackType::Wishes,
        })
    ));
    // No delivery was attempted and the session is gone regardless.
    assert_eq!(forwarder.attempts.load(Ordering::SeqCst), 0);
    assert_eq!(engine.stage(sender.id).await, None);
}

#[tokio::test]
async fn cancel_is_idempotent() {
    let engine = engine(Arc::default());
    let user = UserId(11);

    assert!(!engine.cancel(user).await);

    engine.begin(user).await;
    assert!(engine.cancel(user).await);
    assert_eq!(engine.stage(user).await, None);
    assert!(!engine.cancel(user).await);
}

#[tokio::test]
async fn concurrent_users_resolve_independent_recipients() {
    let forwarder = Arc::new(RecordingForwarder::default());
    let engine = Arc::new(engine(forwarder.clone()));
    let one = sender(21);
    let two = sender(22);

    let flow = |engine: Arc<FeedbackEngine>, who: Sender, format, feedback_type, text: &'static str| async move {
        engine.begin(who.id).await;
        engine.select_format(who.id, format).await.unwrap();
        engine.select_feedback_type(who.id, feedback_type).await.unwrap();
        engine.submit(&who, text).await.unwrap()
    };

    let (to_one, to_two) = tokio::join!(
        flow(
            engine.clone(),
            one,
            AppFormat::Android,
            FeedbackType::Wishes,
            "from android"
        ),
        flow(
            engine.clone(),
            two,
            AppFormat::MiniApp,
            FeedbackType::Features,
            "from miniapp"
        ),
    );

    assert_eq!(to_one, R1);
    assert_eq!(to_two, R2);

    let sent = forwarder.sent.lock().await;
    assert_eq!(sent.len(), 2);
    let body_for = |chat: ChatId| {
        sent.iter()
            .find(|(to, _)| *to == chat)
            .map(|(_, body)| body.clone())
            .unwrap()
    };
    // Neither submission observed the other's fields.
    let one_body = body_for(R1);
    assert!(one_body.contains("from android"));
    assert!(one_body.contains("ID: 21"));
    let two_body = body_for(R2);
    assert!(two_body.contains("from miniapp"));
    assert!(two_body.contains("ID: 22"));
}
