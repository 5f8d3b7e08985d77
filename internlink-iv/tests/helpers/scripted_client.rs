//! Completion client that replays scripted replies

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use internlink_iv::services::{ChatMessage, CompletionClient, CompletionError};

/// One recorded completion call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// Replays queued replies in order; an exhausted script yields an API error
#[derive(Default)]
pub struct ScriptedCompletionClient {
    replies: Mutex<VecDeque<Result<String, u16>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedCompletionClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_replies<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::default();
        client
            .replies
            .lock()
            .unwrap()
            .extend(replies.into_iter().map(|r| Ok(r.into())));
        Arc::new(client)
    }

    /// Queue an HTTP-status failure
    pub fn push_failure(&self, status: u16) {
        self.replies.lock().unwrap().push_back(Err(status));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletionClient {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn complete_json(
        &self,
        system: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            messages: messages.to_vec(),
            max_tokens,
        });

        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(status)) => Err(CompletionError::Api(status, "scripted failure".to_string())),
            None => Err(CompletionError::Api(500, "script exhausted".to_string())),
        }
    }
}
