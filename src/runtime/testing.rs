//! Mock implementations for testing
//!
//! These mocks record every call so tests can assert on exact ordering.

use super::traits::DeliveryAdapter;
use crate::avatar::{AvatarFetcher, AvatarRequest, FetchError};
use crate::state_machine::{ChatId, MenuChoice, MessageId};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One recorded delivery call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryCall {
    Text {
        chat: ChatId,
        text: String,
    },
    Menu {
        chat: ChatId,
        text: String,
        tokens: Vec<String>,
    },
    ClearMenu {
        chat: ChatId,
        message_id: MessageId,
    },
    Photo {
        chat: ChatId,
        filename: String,
        len: usize,
    },
    Document {
        chat: ChatId,
        filename: String,
        len: usize,
    },
}

/// Delivery adapter that records calls instead of talking to a chat API.
pub struct MockDelivery {
    calls: Mutex<Vec<DeliveryCall>>,
    fail: bool,
}

impl MockDelivery {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A delivery adapter whose every call fails after being recorded.
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn recorded_calls(&self) -> Vec<DeliveryCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: DeliveryCall) -> Result<(), String> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err("mock delivery failure".to_string())
        } else {
            Ok(())
        }
    }
}

impl Default for MockDelivery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliveryAdapter for MockDelivery {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), String> {
        self.record(DeliveryCall::Text {
            chat,
            text: text.to_string(),
        })
    }

    async fn send_menu(
        &self,
        chat: ChatId,
        text: &str,
        choices: &[MenuChoice],
    ) -> Result<(), String> {
        self.record(DeliveryCall::Menu {
            chat,
            text: text.to_string(),
            tokens: choices.iter().map(|c| c.token.clone()).collect(),
        })
    }

    async fn clear_menu(&self, chat: ChatId, message_id: MessageId) -> Result<(), String> {
        self.record(DeliveryCall::ClearMenu { chat, message_id })
    }

    async fn send_photo(&self, chat: ChatId, bytes: Bytes, filename: &str) -> Result<(), String> {
        self.record(DeliveryCall::Photo {
            chat,
            filename: filename.to_string(),
            len: bytes.len(),
        })
    }

    async fn send_document(
        &self,
        chat: ChatId,
        bytes: Bytes,
        filename: &str,
    ) -> Result<(), String> {
        self.record(DeliveryCall::Document {
            chat,
            filename: filename.to_string(),
            len: bytes.len(),
        })
    }
}

/// Avatar fetcher that returns queued outcomes and records requests.
pub struct MockFetcher {
    responses: Mutex<VecDeque<Result<Bytes, FetchError>>>,
    requests: Mutex<Vec<AvatarRequest>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, bytes: Bytes) {
        self.responses.lock().unwrap().push_back(Ok(bytes));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: FetchError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<AvatarRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AvatarFetcher for MockFetcher {
    async fn fetch(&self, request: &AvatarRequest) -> Result<Bytes, FetchError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::network("no mock response queued")))
    }
}
