//! Conversation segmentation.
//!
//! Splits a directional transcript into training examples with a single
//! left-to-right scan:
//!
//! 1. Skip forward to the next inbound message.
//! 2. Collect the maximal inbound run (the client turn).
//! 3. Collect the maximal outbound run that immediately follows it.
//! 4. If the outbound run is non-empty, emit an example whose context is
//!    every message before the client run.
//!
//! A client run at the end of the transcript, or one followed by a message
//! of unrecognised direction, yields nothing. The scan never rewinds.

use serde::Serialize;
use thiserror::Error;

use super::conversation::Conversation;
use super::example::TrainingExample;
use super::message::{ContextMessage, Direction};

/// Separator placed between consecutive consultant fragments.
const REPLY_SEPARATOR: &str = " ";

/// Structural problems found while segmenting one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("conversation {conversation}: message {index} has a missing or non-string '{field}'")]
    MalformedMessage {
        /// Contact id of the conversation, or a placeholder when absent.
        conversation: String,
        /// Zero-based position of the message in the transcript.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    #[error("conversation {conversation}: 'conversation' must be a list of messages")]
    MalformedTranscript { conversation: String },
}

impl SegmentError {
    fn missing(conversation: &Conversation, index: usize, field: &'static str) -> Self {
        SegmentError::MalformedMessage {
            conversation: conversation.label().to_string(),
            index,
            field,
        }
    }
}

/// A conversation from a batch that could not be segmented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentFailure {
    /// Position of the conversation in the input batch.
    pub position: usize,
    /// Contact id of the failed conversation, if it had one.
    pub contact_id: Option<String>,
    pub error: SegmentError,
}

/// Output of [`segment_all`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SegmentedBatch {
    /// Examples from every conversation that segmented cleanly, in input order.
    pub examples: Vec<TrainingExample>,
    /// Conversations that failed, in input order.
    #[serde(skip)]
    pub failures: Vec<SegmentFailure>,
}

/// Segments one conversation into training examples.
///
/// # Errors
///
/// - `MalformedTranscript` if the input held no message list.
/// - `MalformedMessage` if a message the scan needs to classify has no
///   `direction`, or a message whose text is collected (client run, reply
///   run, or context) has no `text`.
pub fn segment(conversation: &Conversation) -> Result<Vec<TrainingExample>, SegmentError> {
    if conversation.has_malformed_transcript() {
        return Err(SegmentError::MalformedTranscript {
            conversation: conversation.label().to_string(),
        });
    }

    let len = conversation.messages().len();
    let mut examples = Vec::new();
    let mut i = 0;

    while i < len {
        if !direction_at(conversation, i)?.is_inbound() {
            i += 1;
            continue;
        }

        let client_start = i;
        let mut client_turn = Vec::new();
        while i < len && direction_at(conversation, i)?.is_inbound() {
            client_turn.push(text_at(conversation, i)?.to_string());
            i += 1;
        }

        if client_turn.is_empty() || i >= len {
            break;
        }

        let mut fragments = Vec::new();
        while i < len && direction_at(conversation, i)?.is_outbound() {
            fragments.push(text_at(conversation, i)?);
            i += 1;
        }

        // Filler after the client run: drop the run and resume from here.
        if fragments.is_empty() {
            continue;
        }

        examples.push(TrainingExample::new(
            context_before(conversation, client_start)?,
            client_turn,
            fragments.join(REPLY_SEPARATOR),
            conversation.scenario().map(str::to_string),
            conversation.contact_id().map(str::to_string),
        ));
    }

    Ok(examples)
}

/// Segments every conversation in order and concatenates the results.
///
/// A conversation that fails to segment is recorded in
/// [`SegmentedBatch::failures`] and contributes no examples; the rest of the
/// batch is unaffected.
pub fn segment_all(conversations: &[Conversation]) -> SegmentedBatch {
    let mut batch = SegmentedBatch::default();

    for (position, conversation) in conversations.iter().enumerate() {
        match segment(conversation) {
            Ok(examples) => batch.examples.extend(examples),
            Err(error) => batch.failures.push(SegmentFailure {
                position,
                contact_id: conversation.contact_id().map(str::to_string),
                error,
            }),
        }
    }

    batch
}

fn direction_at(conversation: &Conversation, index: usize) -> Result<&Direction, SegmentError> {
    conversation.messages()[index]
        .direction()
        .ok_or_else(|| SegmentError::missing(conversation, index, "direction"))
}

fn text_at(conversation: &Conversation, index: usize) -> Result<&str, SegmentError> {
    conversation.messages()[index]
        .text()
        .ok_or_else(|| SegmentError::missing(conversation, index, "text"))
}

/// Builds the context for a client run starting at `client_start`.
///
/// Always re-walks from the start of the transcript.
fn context_before(
    conversation: &Conversation,
    client_start: usize,
) -> Result<Vec<ContextMessage>, SegmentError> {
    (0..client_start)
        .map(|index| {
            let message = &conversation.messages()[index];
            Ok(ContextMessage {
                message_id: message.message_id().cloned(),
                direction: direction_at(conversation, index)?.clone(),
                text: text_at(conversation, index)?.to_string(),
                timestamp: message.timestamp().cloned(),
            })
        })
        .collect()
}
