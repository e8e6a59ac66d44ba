//! Chat widget: input capture, transcript and the backend round trip

use std::rc::Rc;

use crate::client::{ChatRequest, ChatTransport};
use crate::config::ChatConfig;
use crate::error::PageResult;
use crate::transcript::{Transcript, TranscriptEntry};
use crate::view::View;

pub struct ChatWidget<V, T> {
    view: V,
    transport: Rc<T>,
    input_id: String,
    transcript: Transcript,
    fallback_reply: String,
}

impl<V: View, T: ChatTransport> ChatWidget<V, T> {
    pub fn new(view: V, transport: Rc<T>, config: &ChatConfig) -> Self {
        Self {
            view,
            transport,
            input_id: config.input_id.clone(),
            transcript: Transcript::new(config.messages_id.clone()),
            fallback_reply: config.fallback_reply.clone(),
        }
    }

    /// Take the typed message, echo it into the transcript and clear the input.
    ///
    /// Returns `None` for blank input. Otherwise the returned [`PendingReply`]
    /// performs the request and appends the answer once driven to completion;
    /// nothing reaches the network until then.
    pub fn send_message(&self) -> PageResult<Option<PendingReply<V, T>>> {
        let message = self.view.input_value(&self.input_id)?.trim().to_string();
        if message.is_empty() {
            return Ok(None);
        }

        self.transcript
            .render_message(&self.view, &TranscriptEntry::user(message.clone()))?;
        self.view.set_input_value(&self.input_id, "")?;

        Ok(Some(PendingReply {
            view: self.view.clone(),
            transport: Rc::clone(&self.transport),
            transcript: self.transcript.clone(),
            fallback_reply: self.fallback_reply.clone(),
            request: ChatRequest { message },
        }))
    }
}

/// A sent message whose reply has not been rendered yet.
///
/// `settle` consumes the value, so each send appends exactly one bot entry.
#[must_use = "the reply is only requested and rendered when settled"]
pub struct PendingReply<V, T> {
    view: V,
    transport: Rc<T>,
    transcript: Transcript,
    fallback_reply: String,
    request: ChatRequest,
}

impl<V: View, T: ChatTransport> PendingReply<V, T> {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// Post the message and render the reply, or the fallback text on failure.
    pub async fn settle(self) -> PageResult<TranscriptEntry> {
        let entry = match self.transport.send(&self.request).await {
            Ok(response) => TranscriptEntry::bot(response.reply),
            Err(err) => {
                log::error!("Error: {}", err);
                TranscriptEntry::bot(self.fallback_reply)
            }
        };

        self.transcript.render_message(&self.view, &entry)?;
        Ok(entry)
    }
}
