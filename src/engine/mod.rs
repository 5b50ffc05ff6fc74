//! The feedback conversation engine.
//!
//! A strict three-step state machine per user: choose the app format, choose
//! the feedback category, enter the message. Each operation locks the user's
//! session slot for its whole duration, so events for one user apply one at a
//! time in arrival order while different users run fully in parallel.

pub mod forward;
pub mod recipients;
pub mod session;
pub mod store;

use std::sync::Arc;

use teloxide::types::{ChatId, UserId};
use thiserror::Error;

use self::forward::FeedbackForwarder;
use self::recipients::RecipientTable;
use self::session::{AppFormat, FeedbackType, Sender, Session, Stage, Submission};
use self::store::SessionStore;

/// Everything that can go wrong while advancing a feedback form. All
/// variants are recovered at the handler layer and turned into a reply; none
/// crash the process.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A continuation event arrived but no session exists for the user.
    #[error("no active feedback session")]
    SessionExpired,
    /// A menu selection arrived for a step that is not the current one
    /// (duplicate or late button press).
    #[error("selection does not match the current step")]
    StaleSelection,
    /// Free text arrived while a menu step is still open. Nothing is written.
    #[error("a menu choice is still pending")]
    AwaitingChoice,
    /// The routing table has no entry for the chosen pair.
    #[error("no recipient configured for {format} / {feedback_type}")]
    RecipientNotConfigured {
        format: AppFormat,
        feedback_type: FeedbackType,
    },
    /// The transport failed to deliver the notification. Not retried.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

pub struct FeedbackEngine {
    store: SessionStore,
    recipients: RecipientTable,
    forwarder: Arc<dyn FeedbackForwarder>,
}

impl FeedbackEngine {
    pub fn new(
        store: SessionStore,
        recipients: RecipientTable,
        forwarder: Arc<dyn FeedbackForwarder>,
    ) -> Self {
        Self {
            store,
            recipients,
            forwarder,
        }
    }

    /// Start (or restart) the form. Any prior session is discarded whole;
    /// there is no merging of half-finished answers.
    pub async fn begin(&self, user: UserId) {
        let mut slot = self.store.slot(user).await;
        if slot.is_some() {
            tracing::debug!(target: "feedback", user_id = %user, "restart discards previous session");
        }
        *slot = Some(Session::AwaitingFormat);
    }

    /// Record the app format chosen on step 1 and open step 2.
    pub async fn select_format(&self, user: UserId, format: AppFormat) -> Result<(), FlowError> {
        let mut slot = self.store.slot(user).await;
        match slot.as_ref() {
            None => Err(FlowError::SessionExpired),
            Some(Session::AwaitingFormat) => {
                *slot = Some(Session::AwaitingFeedbackType { format });
                tracing::info!(target: "feedback", user_id = %user, format = format.token(), "format chosen");
                Ok(())
            }
            Some(_) => Err(FlowError::StaleSelection),
        }
    }

    /// Record the category chosen on step 2 and open the free-text step.
    /// Returns the format picked earlier so the caller can echo both choices.
    pub async fn select_feedback_type(
        &self,
        user: UserId,
        feedback_type: FeedbackType,
    ) -> Result<AppFormat, FlowError> {
        let mut slot = self.store.slot(user).await;
        match slot.as_ref() {
            None => Err(FlowError::SessionExpired),
            Some(Session::AwaitingFeedbackType { format }) => {
                let format = *format;
                *slot = Some(Session::AwaitingMessage {
                    format,
                    feedback_type,
                });
                tracing::info!(
                    target: "feedback",
                    user_id = %user,
                    format = format.token(),
                    feedback_type = feedback_type.token(),
                    "feedback type chosen"
                );
                Ok(format)
            }
            Some(_) => Err(FlowError::StaleSelection),
        }
    }

    /// Complete the form: resolve the recipient, deliver the notification and
    /// report the outcome. Once the session is found on the free-text step it
    /// never survives this call — success, missing table entry and delivery
    /// failure all end it.
    pub async fn submit(&self, sender: &Sender, text: &str) -> Result<ChatId, FlowError> {
        let mut slot = self.store.slot(sender.id).await;
        let (format, feedback_type) = match slot.as_ref() {
            None => return Err(FlowError::SessionExpired),
            Some(Session::AwaitingMessage {
                format,
                feedback_type,
            }) => (*format, *feedback_type),
            Some(_) => return Err(FlowError::AwaitingChoice),
        };

        let outcome = self.deliver(format, feedback_type, sender, text).await;
        *slot = None;
        outcome
    }

    async fn deliver(
        &self,
        format: AppFormat,
        feedback_type: FeedbackType,
        sender: &Sender,
        text: &str,
    ) -> Result<ChatId, FlowError> {
        let recipient = self
            .recipients
            .resolve(format, feedback_type)
            .ok_or(FlowError::RecipientNotConfigured {
                format,
                feedback_type,
            })?;

        let submission = Submission {
            format,
            feedback_type,
            sender: sender.clone(),
            text: text.to_owned(),
        };
        tracing::info!(
            target: "feedback",
            user_id = %sender.id,
            username = %sender.handle(),
            format = format.token(),
            feedback_type = feedback_type.token(),
            recipient = %recipient,
            "forwarding feedback"
        );
        let body = submission.render();
        tracing::debug!(target: "feedback", body = %body, "notification body");

        self.forwarder
            .forward(recipient, &body)
            .await
            .map_err(|e| {
                tracing::error!(target: "feedback", recipient = %recipient, error = %e, "forwarding failed");
                FlowError::Delivery(e.to_string())
            })?;

        tracing::info!(target: "feedback", recipient = %recipient, "feedback delivered");
        Ok(recipient)
    }

    /// Drop the user's session if one exists. Idempotent; the acknowledgment
    /// is identical either way.
    pub async fn cancel(&self, user: UserId) -> bool {
        let mut slot = self.store.slot(user).await;
        let existed = slot.take().is_some();
        if existed {
            tracing::info!(target: "feedback", user_id = %user, "feedback form cancelled");
        }
        existed
    }

    /// Current position of the user's form, if a session is active.
    pub async fn stage(&self, user: UserId) -> Option<Stage> {
        self.store.slot(user).await.as_ref().map(Session::stage)
    }
}
