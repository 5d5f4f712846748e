//! # Conversation Controller
//!
//! Owns the thread and drives the reply pipeline.
//!
//! Every accepted submission starts one pipeline: a background task that
//! sleeps, reports the first stage, sleeps again, and reports the second.
//! The task never touches the conversation itself. It sends
//! `Action::Pipeline` events back to the event loop, which applies them
//! through [`ConversationController::advance`]. Message ids are handed out
//! at append time, so they always increase.
//!
//! ```text
//! submit_user_text()
//!       │  append user text, spawn task
//!       ▼
//! AwaitingFirstReply ──(first_reply_delay)──► FirstReplyDue
//!       │  append assistant text
//!       ▼
//! AwaitingCarousel ───(carousel_delay)──────► CarouselDue
//!       │  append assistant carousel
//!       ▼
//!    Complete
//! ```
//!
//! Pipelines are independent. A second submission while one is pending
//! starts a second pipeline, and their messages may interleave. Dropping
//! the controller aborts whatever is still pending.

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

use crate::core::action::Action;
use crate::core::message::{Message, MessageBody, MessageId, Role};
use crate::core::script::{Reply, ReplyScript};

pub const DEFAULT_FIRST_REPLY_DELAY_MS: u64 = 1000;
pub const DEFAULT_CAROUSEL_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PipelineId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    AwaitingFirstReply,
    AwaitingCarousel,
    Complete,
}

/// A timer expiry reported by a pipeline task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent {
    FirstReplyDue(PipelineId),
    CarouselDue(PipelineId),
}

/// The two delays of the reply pipeline. The carousel delay is measured
/// from the first reply, not from the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTiming {
    pub first_reply_delay: Duration,
    pub carousel_delay: Duration,
}

impl Default for ReplyTiming {
    fn default() -> Self {
        Self::from_millis(DEFAULT_FIRST_REPLY_DELAY_MS, DEFAULT_CAROUSEL_DELAY_MS)
    }
}

impl ReplyTiming {
    pub fn from_millis(first_reply_delay_ms: u64, carousel_delay_ms: u64) -> Self {
        Self {
            first_reply_delay: Duration::from_millis(first_reply_delay_ms),
            carousel_delay: Duration::from_millis(carousel_delay_ms),
        }
    }
}

struct Pipeline {
    stage: PipelineStage,
    reply: Reply,
    handle: Option<AbortHandle>,
}

pub struct ConversationController {
    messages: Vec<Message>,
    next_message_id: u64,
    next_pipeline_id: u64,
    pipelines: HashMap<PipelineId, Pipeline>,
    script: ReplyScript,
    timing: ReplyTiming,
    tx: UnboundedSender<Action>,
}

impl ConversationController {
    pub fn new(script: ReplyScript, timing: ReplyTiming, tx: UnboundedSender<Action>) -> Self {
        Self {
            messages: Vec::new(),
            next_message_id: 1,
            next_pipeline_id: 1,
            pipelines: HashMap::new(),
            script,
            timing,
            tx,
        }
    }

    /// Seeds the thread with the script's opening messages.
    pub fn with_opening(mut self) -> Self {
        let opening = self.script.opening().to_vec();
        for body in opening {
            self.append(Role::Assistant, body);
        }
        self
    }

    /// Appends a user message and starts its reply pipeline.
    ///
    /// Whitespace-only text is ignored: nothing is appended, nothing is
    /// scheduled, and `None` comes back. Returns without waiting on any
    /// timer.
    pub fn submit_user_text(&mut self, text: &str) -> Option<PipelineId> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring empty submission");
            return None;
        }

        self.append(Role::User, MessageBody::Text(text.to_string()));

        let reply = self.script.select(text).clone();
        let id = PipelineId(self.next_pipeline_id);
        self.next_pipeline_id += 1;

        let handle = spawn_pipeline(id, self.timing, self.tx.clone());
        self.pipelines.insert(
            id,
            Pipeline {
                stage: PipelineStage::AwaitingFirstReply,
                reply,
                handle: Some(handle),
            },
        );
        info!("Spawned reply pipeline {:?} ({} pending)", id, self.pending_pipelines());
        Some(id)
    }

    /// Applies a stage event from a pipeline task.
    ///
    /// Returns `true` if a message was appended. Events for unknown
    /// pipelines, or for a stage the pipeline has already left, are dropped.
    pub fn advance(&mut self, event: PipelineEvent) -> bool {
        match event {
            PipelineEvent::FirstReplyDue(id) => {
                let Some(pipeline) = self.pipelines.get_mut(&id) else {
                    warn!("First reply for unknown pipeline {:?}", id);
                    return false;
                };
                if pipeline.stage != PipelineStage::AwaitingFirstReply {
                    warn!("Pipeline {:?} got a first reply in stage {:?}", id, pipeline.stage);
                    return false;
                }
                pipeline.stage = PipelineStage::AwaitingCarousel;
                let text = pipeline.reply.text.clone();
                self.append(Role::Assistant, MessageBody::Text(text));
                true
            }
            PipelineEvent::CarouselDue(id) => {
                let Some(pipeline) = self.pipelines.get_mut(&id) else {
                    warn!("Carousel for unknown pipeline {:?}", id);
                    return false;
                };
                if pipeline.stage != PipelineStage::AwaitingCarousel {
                    warn!("Pipeline {:?} got a carousel in stage {:?}", id, pipeline.stage);
                    return false;
                }
                pipeline.stage = PipelineStage::Complete;
                pipeline.handle = None;
                let items = pipeline.reply.pois.clone();
                let appended = self.append(Role::Assistant, MessageBody::Carousel(items));
                info!("Reply pipeline {:?} complete", id);
                appended
            }
        }
    }

    /// The thread so far, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn pipeline_stage(&self, id: PipelineId) -> Option<PipelineStage> {
        self.pipelines.get(&id).map(|p| p.stage)
    }

    /// Number of pipelines that have not reached `Complete`.
    pub fn pending_pipelines(&self) -> usize {
        self.pipelines
            .values()
            .filter(|p| p.stage != PipelineStage::Complete)
            .count()
    }

    /// Aborts every pending pipeline task. Their stages stay where they
    /// were; no further events will arrive for them.
    pub fn shutdown(&mut self) {
        let mut aborted = 0;
        for pipeline in self.pipelines.values_mut() {
            if let Some(handle) = pipeline.handle.take() {
                handle.abort();
                aborted += 1;
            }
        }
        if aborted > 0 {
            info!("Aborted {} pending reply pipeline(s)", aborted);
        }
    }

    fn append(&mut self, role: Role, body: MessageBody) -> bool {
        let id = MessageId(self.next_message_id);
        match Message::from_body(id, role, body) {
            Ok(message) => {
                self.next_message_id += 1;
                debug!("Appending {:?} {:?} message {:?}", role, message.kind(), id);
                self.messages.push(message);
                true
            }
            Err(e) => {
                warn!("Dropping {:?} message: {}", role, e);
                false
            }
        }
    }
}

impl Drop for ConversationController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_pipeline(id: PipelineId, timing: ReplyTiming, tx: UnboundedSender<Action>) -> AbortHandle {
    tokio::spawn(async move {
        tokio::time::sleep(timing.first_reply_delay).await;
        if tx
            .send(Action::Pipeline(PipelineEvent::FirstReplyDue(id)))
            .is_err()
        {
            warn!("Pipeline {:?}: receiver dropped before first reply", id);
            return;
        }

        tokio::time::sleep(timing.carousel_delay).await;
        if tx
            .send(Action::Pipeline(PipelineEvent::CarouselDue(id)))
            .is_err()
        {
            warn!("Pipeline {:?}: receiver dropped before carousel", id);
        }
    })
    .abort_handle()
}
